use std::sync::Arc;

use crate::config::Config;
use crate::scoring::ResumeScorer;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring pipeline bound to the provider selected at startup.
    pub scorer: ResumeScorer,
    /// Pluggable document store. Default: `InMemoryResumeStore`.
    pub store: Arc<dyn ResumeStore>,
}
