//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::models::ScoreRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub document_id: String,
    pub company: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreTextRequest {
    pub resume_text: String,
    pub company: String,
    pub role: String,
}

fn require(value: &str, name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{name} is required")));
    }
    Ok(trimmed.to_string())
}

/// POST /api/v1/score
///
/// Scores a stored resume for a company/role and saves the result on the document.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreRecord>, AppError> {
    let document_id = require(&request.document_id, "document_id")?;
    let company = require(&request.company, "company")?;
    let role = require(&request.role, "role")?;

    let id = Uuid::parse_str(&document_id).map_err(|_| {
        AppError::Validation(format!("Invalid document_id format: {document_id}"))
    })?;

    let doc = state.store.get(id).await.ok_or_else(|| {
        AppError::NotFound(format!(
            "Resume not found with document_id: {id}. Please upload the resume first."
        ))
    })?;
    if doc.text.trim().is_empty() {
        return Err(AppError::NotFound(format!("Resume text not found for document_id: {id}")));
    }

    let record = state.scorer.score_record(&doc.text, &company, &role).await?;
    state.store.save_score(id, record.clone()).await?;

    Ok(Json(record))
}

/// POST /api/v1/score/text
///
/// Scores resume text supplied inline. Nothing is stored.
pub async fn handle_score_text(
    State(state): State<AppState>,
    Json(request): Json<ScoreTextRequest>,
) -> Result<Json<ScoreRecord>, AppError> {
    let resume_text = require(&request.resume_text, "resume_text")?;
    let company = require(&request.company, "company")?;
    let role = require(&request.role, "role")?;

    let record = state
        .scorer
        .score_record(&resume_text, &company, &role)
        .await?;
    Ok(Json(record))
}
