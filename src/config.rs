use std::fmt;
use std::str::FromStr;

use crate::error::AgentError;

/// System prompt seeded as the first turn of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful customer support agent for a technology company. \
You should be friendly, professional, and helpful. If you cannot help with something or \
the customer explicitly asks for a human agent, politely acknowledge the request.\n\n\
Guidelines:\n\
- Be concise but thorough\n\
- Ask clarifying questions when needed\n\
- Provide step-by-step instructions when appropriate\n\
- Acknowledge when escalation to human agents is needed\n\
- Remember context from previous messages in the conversation";

/// Closed set of completion backends. Adding a backend means adding a
/// variant here and an arm in `llm::create_client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Ollama,
}

impl FromStr for Provider {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "ollama" => Ok(Provider::Ollama),
            other => Err(AgentError::Configuration(format!(
                "unsupported provider '{}', expected 'openai' or 'ollama'",
                other
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Ollama => write!(f, "ollama"),
        }
    }
}

/// Process-wide configuration, read once at startup and immutable after.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub ollama_base_url: String,
    pub max_history: usize,
    pub escalation_keywords: Vec<String>,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AgentError> {
        let provider: Provider = env_or("MODEL_PROVIDER", "openai").parse()?;

        Ok(Self {
            provider,
            model: env_or("MODEL_NAME", "gpt-4"),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            ollama_base_url: trim_trailing_slash(env_or("OLLAMA_BASE_URL", "http://localhost:11434")),
            max_history: parse_env("MAX_CONVERSATION_HISTORY", 10)?,
            escalation_keywords: parse_keywords(&env_or(
                "ESCALATION_KEYWORDS",
                "human,manager,supervisor,escalate",
            )),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: parse_env("TEMPERATURE", 0.7)?,
            max_tokens: parse_env("MAX_TOKENS", 500)?,
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 8080)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, AgentError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AgentError::Configuration(format!("invalid value '{}' for {}", raw, key))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|kw| kw.trim().to_string())
        .filter(|kw| !kw.is_empty())
        .collect()
}

fn trim_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
