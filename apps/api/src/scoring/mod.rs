// Resume scoring pipeline: prompt → provider → sanitize → JSON decode
// (with one repair round-trip) → schema validation.
// All LLM calls go through llm_client; no direct HTTP here.

pub mod decoder;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::scoring::validation::SchemaViolation;

pub use decoder::ResumeScorer;

/// Every way a scoring call can fail. Each variant is terminal for the call.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Provider settings are missing; no request was sent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success status, transport failure, or unrecognised response shape.
    #[error("Upstream provider error: {0}")]
    Upstream(LlmError),

    #[error("Provider timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// Still not JSON after the repair attempt. `raw` is the truncated second output.
    #[error("Could not parse JSON after retry ({reason}). Raw model output: {raw}")]
    MalformedOutput { reason: String, raw: String },

    #[error("Schema violation at {0}")]
    SchemaViolation(#[from] SchemaViolation),
}

impl From<LlmError> for ScoringError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Configuration(msg) => ScoringError::Configuration(msg),
            LlmError::Timeout { secs } => ScoringError::Timeout { secs },
            other => ScoringError::Upstream(other),
        }
    }
}
