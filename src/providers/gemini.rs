use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    core::errors::{AppError, AppResult},
    providers::TextGenerator,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiOutput {
    pub text: String,
    pub token_usage: Value,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self {
            http,
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(&self, api_key: &str, prompt: &str) -> AppResult<GeminiOutput> {
        let endpoint = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let payload = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt}]
                }
            ],
            "generationConfig": {
                "temperature": 0.7,
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::ProviderTimeout
                } else {
                    AppError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AppError::ProviderInvalidResponse(err.to_string()))?;
        let text = candidate_text(&body)?;
        debug!(model = %self.model, chars = text.len(), "gemini response received");

        Ok(GeminiOutput {
            text,
            token_usage: token_usage(&body),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> AppResult<String> {
        let output = self.generate_content(api_key, prompt).await?;
        debug!(model = %self.model, usage = %output.token_usage, "gemini token usage");
        Ok(output.text)
    }
}

/// `usageMetadata` of a response, or an empty object when absent.
pub fn token_usage(body: &Value) -> Value {
    body.get("usageMetadata")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}))
}

pub fn status_error(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::ProviderAuth,
        StatusCode::TOO_MANY_REQUESTS => AppError::ProviderRateLimited,
        status => AppError::ProviderInvalidResponse(format!("status {status} body {body}")),
    }
}

/// Concatenates the text parts of the first candidate.
pub fn candidate_text(body: &Value) -> AppResult<String> {
    let parts = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|items: &Vec<Value>| items.first())
        .and_then(|item: &Value| item.get("content"))
        .and_then(|content: &Value| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::ProviderInvalidResponse("missing text candidate".to_string()))?;

    let text = parts
        .iter()
        .filter_map(|part: &Value| part.get("text").and_then(Value::as_str))
        .collect::<String>();
    if text.is_empty() {
        return Err(AppError::ProviderInvalidResponse(
            "missing text candidate".to_string(),
        ));
    }
    Ok(text)
}
