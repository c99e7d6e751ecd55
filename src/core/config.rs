use std::path::PathBuf;

use crate::{
    core::errors::{AppError, AppResult},
    planner::request::MAX_TRIP_DAYS,
    providers::gemini::DEFAULT_GEMINI_MODEL,
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub model: String,
    pub max_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".trip-planner"),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_days: MAX_TRIP_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("TRIP_PLANNER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(model) = get("TRIP_PLANNER_MODEL") {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = get("TRIP_PLANNER_MAX_DAYS") {
            config.max_days = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| *days >= 1)
                .ok_or_else(|| {
                    AppError::Config(format!("TRIP_PLANNER_MAX_DAYS must be a positive integer, got {raw}"))
                })?;
        }
        Ok(config)
    }
}

pub fn log_filter_from_env() -> String {
    let level = std::env::var("TRIP_PLANNER_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .to_ascii_lowercase();
    let level = match level.as_str() {
        "trace" | "debug" | "warn" | "error" => level,
        _ => "info".to_string(),
    };
    if sqlx_debug_enabled() {
        level
    } else {
        format!("{level},sqlx::query=warn")
    }
}

fn sqlx_debug_enabled() -> bool {
    matches!(
        std::env::var("TRIP_PLANNER_SQLX_DEBUG")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    )
}
