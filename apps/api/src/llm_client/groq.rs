//! Groq client over its OpenAI-compatible chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ProviderConfig, DEFAULT_GROQ_BASE_URL};
use crate::llm_client::prompts::GROQ_JSON_SYSTEM;
use crate::llm_client::{
    api_error, build_http_client, unexpected, LlmError, LlmProvider, TEMPERATURE,
};

/// Output cap (`max_tokens`) for every Groq call.
pub const MAX_OUTPUT_TOKENS: u32 = 600;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if present and non-empty.
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

pub struct GroqClient {
    client: Client,
    base_url: String,
    model: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl GroqClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client(config.timeout)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("GROQ_API_KEY is not set".to_string()))?;
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("GROQ_MODEL is not set".to_string()))?;

        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: GROQ_JSON_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
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

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|_| unexpected(&text))?;
        let content = parsed.first_content().ok_or_else(|| unexpected(&text))?;

        debug!("Groq call succeeded: model={model}, chars={}", content.len());
        Ok(content)
    }
}
