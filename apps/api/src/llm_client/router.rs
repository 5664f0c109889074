use std::sync::Arc;

use tracing::info;

use crate::config::{ProviderConfig, ProviderKind};
use crate::llm_client::groq::GroqClient;
use crate::llm_client::ollama::OllamaClient;
use crate::llm_client::{LlmError, LlmProvider};

/// Builds the provider named by `config.kind`. This is the only place that
/// branches on provider kind; callers hold an `Arc<dyn LlmProvider>`.
pub fn select_provider(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider: Arc<dyn LlmProvider> = match config.kind {
        ProviderKind::Groq => Arc::new(GroqClient::new(config)?),
        ProviderKind::Ollama => Arc::new(OllamaClient::new(config)?),
    };
    info!("LLM provider selected: {} (model: {})", provider.name(), provider.model());
    Ok(provider)
}
