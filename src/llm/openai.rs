use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::CompletionClient;
use crate::error::AgentError;
use crate::session::Turn;

/// Hosted inference usually answers well within this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the hosted OpenAI chat completions API.
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Fails fast when no credential is configured.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, AgentError> {
        if api_key.is_empty() {
            return Err(AgentError::Configuration(
                "OPENAI_API_KEY is required when MODEL_PROVIDER is 'openai'".into(),
            ));
        }

        info!(model = %model, base_url = %base_url, "initialized OpenAI client");

        Ok(Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| AgentError::Configuration(format!("http client: {}", e)))?,
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn generate(&self, transcript: &[Turn]) -> Result<String, AgentError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": transcript,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI request failed: {}", e);
                AgentError::Upstream(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(%status, "OpenAI returned an error: {}", detail);
            return Err(AgentError::Upstream(format!(
                "OpenAI returned HTTP {}: {}",
                status, detail
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AgentError::Upstream(format!("malformed OpenAI response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AgentError::Upstream("OpenAI response contained no choices".into()))
    }

    async fn list_models(&self) -> Result<serde_json::Value, AgentError> {
        // Hosted variant does not proxy a listing; report the configured model.
        Ok(serde_json::json!({
            "provider": "openai",
            "current_model": self.model,
        }))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
