use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::models::ScoreRecord;

/// An uploaded resume and, once scored, its latest score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: Uuid,
    pub company: String,
    pub filename: String,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
    pub ai_score: Option<ScoreRecord>,
}

impl ResumeDocument {
    pub fn new(company: &str, filename: &str, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: company.to_string(),
            filename: filename.to_string(),
            text,
            uploaded_at: Utc::now(),
            ai_score: None,
        }
    }
}

/// Listing view of a document, without the extracted text.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub company: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub overall_score: Option<u8>,
}

impl From<&ResumeDocument> for ResumeSummary {
    fn from(doc: &ResumeDocument) -> Self {
        Self {
            id: doc.id,
            company: doc.company.clone(),
            filename: doc.filename.clone(),
            uploaded_at: doc.uploaded_at,
            overall_score: doc.ai_score.as_ref().map(|s| s.result.overall_score),
        }
    }
}
