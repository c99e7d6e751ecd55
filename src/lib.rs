pub mod commands;
pub mod core;
pub mod db;
pub mod planner;
pub mod providers;
pub mod security;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::core::{config::AppConfig, errors::AppResult};
use db::Database;
use planner::generator::TripGenerator;
use providers::{gemini::GeminiClient, TextGenerator};

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_new(crate::core::config::log_filter_from_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub generator: TripGenerator,
    pub config: AppConfig,
}

impl AppState {
    pub async fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let db = Database::new(&config.data_dir).await?;
        let gemini = GeminiClient::new(config.model.clone())?;
        Ok(Self::with_parts(db, Arc::new(gemini), config))
    }

    pub fn with_parts(db: Database, text: Arc<dyn TextGenerator>, config: AppConfig) -> Self {
        let generator = TripGenerator::new(text).with_max_days(config.max_days);
        Self {
            db,
            generator,
            config,
        }
    }
}
