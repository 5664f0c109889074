//! Structured decoder. Turns free model text into a validated `ScoringResult`.
//!
//! Attempt 1 sends the scoring prompt. If the cleaned output is not JSON,
//! exactly one repair prompt is sent with the bad output embedded. Anything
//! else (provider errors, timeouts, schema violations, a second parse
//! failure) ends the call immediately.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::sanitize::{sanitize_response, strip_json_fences};
use crate::llm_client::{truncate_chars, LlmProvider};
use crate::scoring::models::{ScoreRecord, ScoringResult};
use crate::scoring::prompts::{build_repair_prompt, build_scoring_prompt, REPAIR_EXCERPT_LIMIT};
use crate::scoring::validation::validate_scoring_result;
use crate::scoring::ScoringError;

/// How much of a bad first response goes into the warning log.
const LOG_EXCERPT_LIMIT: usize = 500;

/// Scores resumes through a single provider. Holds no mutable state, so one
/// instance can serve any number of concurrent calls.
#[derive(Clone)]
pub struct ResumeScorer {
    provider: Arc<dyn LlmProvider>,
}

impl ResumeScorer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    pub async fn score(
        &self,
        resume_text: &str,
        company: &str,
        role: &str,
    ) -> Result<ScoringResult, ScoringError> {
        let prompt = build_scoring_prompt(resume_text, company, role);
        let first = self.generate_clean(&prompt).await?;

        let value = match serde_json::from_str::<Value>(&first) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "First attempt JSON parse failed: {e}. Raw content: {}",
                    truncate_chars(&first, LOG_EXCERPT_LIMIT)
                );
                let retry = self.generate_clean(&build_repair_prompt(&first)).await?;
                serde_json::from_str::<Value>(&retry).map_err(|e| {
                    warn!("Repair attempt JSON parse failed: {e}");
                    ScoringError::MalformedOutput {
                        reason: e.to_string(),
                        raw: truncate_chars(&retry, REPAIR_EXCERPT_LIMIT),
                    }
                })?
            }
        };

        let result = validate_scoring_result(&value).map_err(|violation| {
            warn!("Scoring result failed schema validation: {violation}");
            ScoringError::from(violation)
        })?;

        info!(
            "Resume scored: overall_score={}, provider={}",
            result.overall_score,
            self.provider.name()
        );
        Ok(result)
    }

    /// Scores and stamps the result with provider, model and prompt version.
    pub async fn score_record(
        &self,
        resume_text: &str,
        company: &str,
        role: &str,
    ) -> Result<ScoreRecord, ScoringError> {
        let result = self.score(resume_text, company, role).await?;
        Ok(ScoreRecord::new(
            result,
            self.provider.name(),
            self.provider.model(),
            company,
            role,
        ))
    }

    async fn generate_clean(&self, prompt: &str) -> Result<String, ScoringError> {
        let raw = self.provider.generate(prompt).await?;
        Ok(clean_model_output(&raw))
    }
}

/// Removes a leading ```` ```json ````/```` ``` ```` and trailing fence from
/// the raw text, then applies the generic single-pass sanitizer.
pub fn clean_model_output(raw: &str) -> String {
    sanitize_response(strip_json_fences(raw))
}
