use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::prompts::PROMPT_VERSION;

/// Validated scoring output. Only `validation::validate_scoring_result`
/// builds these from model output; they are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub overall_score: u8, // 0 – 100
    pub metrics: Metrics,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub top_fixes: Vec<String>,
    pub section_feedback: Vec<SectionFeedback>,
    pub notes: String,
}

/// The five rubric dimensions, each 0 – 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub clarity: u8,
    pub impact: u8,
    pub professionalism: u8,
    pub role_fit: u8,
    pub ats: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFeedback {
    pub section: String,
    pub score: u8,
    pub feedback: Vec<String>,
    pub rewrites: Vec<Rewrite>,
}

/// A suggested bullet rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub original: String,
    pub improved: String,
}

/// A scoring result stamped with where and when it was produced.
/// This is what gets stored against a resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(flatten)]
    pub result: ScoringResult,
    pub model: String,
    pub provider: String,
    pub prompt_version: String,
    pub scored_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
}

impl ScoreRecord {
    pub fn new(
        result: ScoringResult,
        provider: &str,
        model: &str,
        company: &str,
        role: &str,
    ) -> Self {
        Self {
            result,
            model: model.to_string(),
            provider: provider.to_string(),
            prompt_version: PROMPT_VERSION.to_string(),
            scored_at: Utc::now(),
            company: company.to_string(),
            role: role.to_string(),
        }
    }
}
