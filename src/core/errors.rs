use serde::ser::SerializeStruct;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("sign-in required: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("provider auth failed")]
    ProviderAuth,
    #[error("provider rate limited")]
    ProviderRateLimited,
    #[error("provider timeout")]
    ProviderTimeout,
    #[error("provider invalid response: {0}")]
    ProviderInvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{message} Response: {excerpt}...")]
    Normalization { message: String, excerpt: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::ProviderAuth => "PROVIDER_AUTH",
            Self::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderInvalidResponse(_) => "PROVIDER_INVALID_RESPONSE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Normalization { .. } => "NORMALIZATION_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the same request could succeed if the caller tried again.
    /// Nothing in this crate retries on its own.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderRateLimited | Self::ProviderTimeout | Self::Network(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(value: regex::Error) -> Self {
        Self::Config(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
