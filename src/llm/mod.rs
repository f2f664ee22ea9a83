pub mod ollama;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, Provider};
use crate::error::AgentError;
use crate::session::Turn;

pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

/// Capability interface over the completion backends.
///
/// Implementations are stateless: the full transcript is passed on every
/// call and nothing is remembered between calls.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    /// Generate a completion for the transcript. One blocking request, no
    /// retries; the client's own timeout bounds the call.
    async fn generate(&self, transcript: &[Turn]) -> Result<String, AgentError>;

    /// List the models the backend exposes.
    async fn list_models(&self) -> Result<serde_json::Value, AgentError>;

    fn model_name(&self) -> &str;
}

/// Create the completion client selected by configuration. Called once at
/// startup; provider selection does not change during the process lifetime.
pub fn create_client(config: &Config) -> Result<Arc<dyn CompletionClient>, AgentError> {
    info!(provider = %config.provider, model = %config.model, "initializing completion client");

    match config.provider {
        Provider::OpenAi => Ok(Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.model.clone(),
            config.temperature,
            config.max_tokens,
        )?)),
        Provider::Ollama => Ok(Arc::new(OllamaClient::new(
            config.ollama_base_url.clone(),
            config.model.clone(),
            config.temperature,
            config.max_tokens,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SYSTEM_PROMPT;

    fn test_config(provider: Provider) -> Config {
        Config {
            provider,
            model: "test-model".into(),
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com/v1".into(),
            ollama_base_url: "http://localhost:11434".into(),
            max_history: 10,
            escalation_keywords: vec![],
            system_prompt: SYSTEM_PROMPT.into(),
            temperature: 0.7,
            max_tokens: 500,
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }

    #[test]
    fn test_openai_requires_api_key() {
        let err = create_client(&test_config(Provider::OpenAi)).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_openai_with_key() {
        let mut config = test_config(Provider::OpenAi);
        config.openai_api_key = "sk-test".into();
        let client = create_client(&config).unwrap();
        assert_eq!(client.model_name(), "test-model");
    }

    #[test]
    fn test_ollama_needs_no_credential() {
        let client = create_client(&test_config(Provider::Ollama)).unwrap();
        assert_eq!(client.model_name(), "test-model");
    }
}
