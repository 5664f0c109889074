//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeSummary};
use crate::resumes::extract::extract_text_from_pdf;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub company: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub count: usize,
    pub resumes: Vec<ResumeSummary>,
}

/// POST /api/v1/resumes
///
/// Multipart upload with a `file` (PDF) and a `company` field. Extracts the
/// text and stores it as a new document.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut company: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            "company" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read company: {e}")))?;
                company = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) = file
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are accepted. Please upload a PDF file.".to_string(),
        ));
    }
    let company = company
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Company name is required and cannot be empty".to_string())
        })?;

    let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let doc = ResumeDocument::new(&company, &filename, text);
    let uploaded_at = doc.uploaded_at;
    let document_id = state.store.insert(doc).await;
    info!("Resume uploaded: id={document_id}, company={company}");

    Ok(Json(UploadResponse {
        document_id,
        company,
        filename,
        uploaded_at,
    }))
}

/// GET /api/v1/resumes
///
/// Lists uploaded resumes without their extracted text.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes: Vec<ResumeSummary> = state
        .store
        .list()
        .await
        .iter()
        .map(ResumeSummary::from)
        .collect();
    Ok(Json(ResumeListResponse {
        count: resumes.len(),
        resumes,
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state
        .store
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(doc))
}
