//! Persona client adapters for the supported model providers.
//!
//! Each adapter implements [`PersonaClient`] over its provider's HTTP
//! API, including a streaming path over server-sent events. A persona
//! is bound to a backend with a `provider:model` spec string, e.g.
//! `openai:gpt-4o` or `anthropic:claude-sonnet-4-5`.

pub mod anthropic;
pub mod gemini;
pub mod openai;
mod sse;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use arena_application::{ClientError, PersonaClient};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout used when no override is configured.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from parsing a model spec string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Model spec '{0}' must have the form 'provider:model'")]
    MissingSeparator(String),

    #[error("Unknown provider '{0}' (expected openai, anthropic, or gemini)")]
    UnknownProvider(String),

    #[error("Model spec '{0}' has an empty model name")]
    EmptyModel(String),
}

/// The supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable that carries this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// A persona's backend binding: which provider, which model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider: ProviderKind,
    pub model: String,
}

impl FromStr for ModelSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model) = s
            .split_once(':')
            .ok_or_else(|| SpecError::MissingSeparator(s.to_string()))?;

        let provider = match provider.trim() {
            "openai" => ProviderKind::OpenAi,
            "anthropic" => ProviderKind::Anthropic,
            "gemini" => ProviderKind::Gemini,
            other => return Err(SpecError::UnknownProvider(other.to_string())),
        };

        let model = model.trim();
        if model.is_empty() {
            return Err(SpecError::EmptyModel(s.to_string()));
        }

        Ok(ModelSpec {
            provider,
            model: model.to_string(),
        })
    }
}

/// Build the HTTP client used by the adapters.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Instantiate the adapter for a model spec.
pub fn create_client(spec: &ModelSpec, api_key: &str, timeout: Duration) -> Arc<dyn PersonaClient> {
    match spec.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiClient::new(api_key, &spec.model).with_timeout(timeout)),
        ProviderKind::Anthropic => {
            Arc::new(AnthropicClient::new(api_key, &spec.model).with_timeout(timeout))
        }
        ProviderKind::Gemini => Arc::new(GeminiClient::new(api_key, &spec.model).with_timeout(timeout)),
    }
}

/// Map a reqwest transport error onto the port's error type.
pub(crate) fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::ConnectionError(e.to_string())
    } else {
        ClientError::RequestFailed(e.to_string())
    }
}
