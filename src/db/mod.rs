use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use tracing::info;

use crate::core::errors::{AppError, AppResult};

pub mod repositories;

pub const DATABASE_FILE: &str = "trip-planner.sqlite";

/// Local stand-in for the hosted document store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(data_dir: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        let db_path = data_dir.join(DATABASE_FILE);
        let connect_options = SqliteConnectOptions::from_str(&format!(
            "sqlite:{}",
            db_path.to_string_lossy().replace('\\', "/")
        ))
        .map_err(|err| AppError::Database(err.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        info!(path = %db_path.display(), "trip store opened");
        Self::migrate(pool).await
    }

    pub async fn in_memory() -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> AppResult<Self> {
        sqlx::query("PRAGMA foreign_keys = ON;")
            .execute(&pool)
            .await?;
        sqlx::migrate!("./src/db/migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub(crate) fn parse_timestamp(value: String) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|err| AppError::Database(format!("invalid timestamp {value}: {err}")))
}
