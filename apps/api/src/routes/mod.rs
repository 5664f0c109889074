pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resumes::handlers as resumes;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_upload),
        )
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        // Scoring API
        .route("/api/v1/score", post(scoring::handle_score))
        .route("/api/v1/score/text", post(scoring::handle_score_text))
        .with_state(state)
}
