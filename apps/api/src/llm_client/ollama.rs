//! Ollama `/api/generate` client, for both local daemons and hosted instances.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{is_local_base_url, ProviderConfig};
use crate::llm_client::prompts::OLLAMA_JSON_PREFIX;
use crate::llm_client::{
    api_error, build_http_client, unexpected, LlmError, LlmProvider, TEMPERATURE,
};

/// Output cap (`num_predict`) for every Ollama call.
pub const MAX_OUTPUT_TOKENS: u32 = 300;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

pub struct OllamaClient {
    client: Client,
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client(config.timeout)?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Resolves endpoint, model and optional bearer token, failing before any
    /// network traffic when a required setting is absent.
    fn resolve(&self) -> Result<(String, &str, Option<&str>), LlmError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("OLLAMA_BASE_URL is not set".to_string()))?;
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("OLLAMA_MODEL is not set".to_string()))?;

        let bearer = if is_local_base_url(base_url) {
            None
        } else {
            Some(self.api_key.as_deref().ok_or_else(|| {
                LlmError::Configuration(
                    "OLLAMA_API_KEY is required for non-local Ollama instances".to_string(),
                )
            })?)
        };

        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));
        Ok((url, model, bearer))
    }
}

#[async_trait]
impl LlmProvider for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let (url, model, bearer) = self.resolve()?;

        let body = GenerateRequest {
            model,
            prompt: format!("{OLLAMA_JSON_PREFIX}{prompt}"),
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                num_predict: MAX_OUTPUT_TOKENS,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport(e, self.timeout))?;

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|_| unexpected(&text))?;
        let content = parsed.response.ok_or_else(|| unexpected(&text))?;

        debug!("Ollama call succeeded: model={model}, chars={}", content.len());
        Ok(content)
    }
}
