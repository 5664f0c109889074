//! LLM Client: the single point of entry for all provider calls in Hirely.
//!
//! ARCHITECTURAL RULE: No other module may talk to an LLM backend directly.
//! Everything goes through an `LlmProvider`, selected once by `router`.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
pub mod fake;
pub mod groq;
pub mod ollama;
pub mod prompts;
pub mod router;
pub mod sanitize;

pub use router::select_provider;

/// Sampling temperature for every scoring call.
pub const TEMPERATURE: f32 = 0.0;

/// Longest upstream body echoed back inside an error.
const ERROR_BODY_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl LlmError {
    /// Converts a transport failure, separating deadline expiry from other errors.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            LlmError::Timeout {
                secs: timeout.as_secs(),
            }
        } else {
            LlmError::Http(err)
        }
    }
}

/// One LLM backend. Implementations send a single prompt and return the raw
/// model text; they never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider identifier, e.g. `"ollama"`.
    fn name(&self) -> &'static str;

    /// Configured model name, or an empty string when unset.
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Returns at most `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Reads the body of a non-success response into an `Api` error.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LlmError::Api {
        status,
        message: truncate_chars(&body, ERROR_BODY_LIMIT),
    }
}

pub(crate) fn unexpected(body: &str) -> LlmError {
    LlmError::UnexpectedResponse(truncate_chars(body, ERROR_BODY_LIMIT))
}
