use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
/// Deadline applied to every outbound provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 240;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            provider: ProviderConfig::from_lookup(|key| std::env::var(key).ok())?,
        })
    }
}

/// Which LLM backend serves generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    Groq,
}

impl ProviderKind {
    /// Parses `LLM_PROVIDER`. Anything other than `groq` selects Ollama.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "groq" => ProviderKind::Groq,
            Some(s) if s.is_empty() || s == "ollama" => ProviderKind::Ollama,
            None => ProviderKind::Ollama,
            Some(other) => {
                warn!("Unknown LLM_PROVIDER '{other}', falling back to ollama");
                ProviderKind::Ollama
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::Groq => "groq",
        }
    }
}

/// Settings for the active LLM provider. Immutable once loaded.
///
/// Fields are optional because an incomplete configuration is reported by the
/// provider client as a configuration error before any request is sent.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Builds the provider section from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let kind = ProviderKind::parse(get("LLM_PROVIDER").as_deref());
        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let (base_url, model, api_key) = match kind {
            ProviderKind::Ollama => (
                get("OLLAMA_BASE_URL"),
                get("OLLAMA_MODEL"),
                get("OLLAMA_API_KEY"),
            ),
            ProviderKind::Groq => (
                Some(get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())),
                Some(get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string())),
                get("GROQ_API_KEY"),
            ),
        };

        Ok(ProviderConfig {
            kind,
            base_url,
            model,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Names of the environment variables the active provider still needs.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.kind {
            ProviderKind::Ollama => {
                if self.base_url.is_none() {
                    missing.push("OLLAMA_BASE_URL");
                }
                if self.model.is_none() {
                    missing.push("OLLAMA_MODEL");
                }
                if !self.is_local() && self.api_key.is_none() {
                    missing.push("OLLAMA_API_KEY");
                }
            }
            ProviderKind::Groq => {
                if self.api_key.is_none() {
                    missing.push("GROQ_API_KEY");
                }
                if self.model.is_none() {
                    missing.push("GROQ_MODEL");
                }
            }
        }
        missing
    }

    /// True when the base URL points at this machine.
    pub fn is_local(&self) -> bool {
        self.base_url.as_deref().map(is_local_base_url).unwrap_or(false)
    }
}

/// True for `localhost` and `127.0.0.1` hosts, regardless of port or path.
pub fn is_local_base_url(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1")))
        .unwrap_or(false)
}
