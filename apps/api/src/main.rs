mod config;
mod errors;
mod llm_client;
mod models;
mod resumes;
mod routes;
mod scoring;
mod state;
mod store;

use anyhow::{bail, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderKind};
use crate::llm_client::select_provider;
use crate::routes::build_router;
use crate::scoring::ResumeScorer;
use crate::state::AppState;
use crate::store::InMemoryResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirely API v{}", env!("CARGO_PKG_VERSION"));

    // Refuse to start with an incomplete provider configuration
    let missing = config.provider.missing_settings();
    if !missing.is_empty() {
        bail!(
            "Missing required environment variables: {}. \
             Please set these in your .env file or environment.",
            missing.join(", ")
        );
    }
    log_provider_mode(&config);

    let provider = select_provider(&config.provider)?;
    let scorer = ResumeScorer::new(provider);

    let state = AppState {
        config: config.clone(),
        scorer,
        store: Arc::new(InMemoryResumeStore::new()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Logs which provider mode is active. Never logs credentials.
fn log_provider_mode(config: &Config) {
    let provider = &config.provider;
    let model = provider.model.as_deref().unwrap_or_default();
    match provider.kind {
        ProviderKind::Groq => info!("Running in GROQ mode (model: {model})"),
        ProviderKind::Ollama if provider.is_local() => {
            info!("Running in LOCAL OLLAMA mode, no API key required (model: {model})")
        }
        ProviderKind::Ollama => {
            info!("Running in CLOUD OLLAMA mode, API key authenticated (model: {model})")
        }
    }
    info!("LLM request timeout: {}s", provider.timeout.as_secs());
}
