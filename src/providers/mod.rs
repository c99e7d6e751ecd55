use async_trait::async_trait;

use crate::core::errors::AppResult;

pub mod gemini;

/// Hosted text generation. Implementations surface provider failures as
/// `AppError` and never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> AppResult<String>;
}
