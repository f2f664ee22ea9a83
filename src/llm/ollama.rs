use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::CompletionClient;
use crate::error::AgentError;
use crate::session::Turn;

/// Local inference is slow; allow a longer window than the hosted client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TAGS_TIMEOUT: Duration = Duration::from_secs(10);

const START_HINT: &str = "start the Ollama service with 'ollama serve'";

/// Client for a locally reachable Ollama service.
#[derive(Debug)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, temperature: f32, max_tokens: u32) -> Self {
        info!(model = %model, base_url = %base_url, "initialized Ollama client");
        Self {
            client: Client::new(),
            base_url,
            model,
            temperature,
            max_tokens,
        }
    }

    /// Connection refusal means the service is not running, which callers
    /// surface differently from a backend that answered badly.
    fn classify_transport_error(&self, e: reqwest::Error) -> AgentError {
        if e.is_connect() {
            error!("cannot reach Ollama at {}: {}", self.base_url, e);
            AgentError::Unavailable {
                service: "ollama".into(),
                hint: START_HINT.into(),
            }
        } else {
            error!("Ollama request failed: {}", e);
            AgentError::Upstream(format!("Ollama request failed: {}", e))
        }
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn generate(&self, transcript: &[Turn]) -> Result<String, AgentError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": transcript,
            "stream": false,
            "options": {
                "temperature": self.temperature,
                "num_predict": self.max_tokens,
            },
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(%status, "Ollama returned an error: {}", detail);
            return Err(AgentError::Upstream(format!(
                "Ollama returned HTTP {}: {}",
                status, detail
            )));
        }

        let completion: OllamaChatResponse = response.json().await.map_err(|e| {
            AgentError::Upstream(format!("malformed Ollama response: {}", e))
        })?;

        Ok(completion.message.content)
    }

    async fn list_models(&self) -> Result<serde_json::Value, AgentError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(TAGS_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Upstream(format!(
                "Ollama returned HTTP {} while listing models",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Upstream(format!("malformed Ollama response: {}", e)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
