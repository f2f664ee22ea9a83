use std::sync::Arc;

use crate::config::Config;
use crate::error::AgentError;
use crate::llm::{self, CompletionClient};
use crate::session::SessionStore;

/// Shared application state: configuration, the session store, and the
/// completion client selected at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AgentError> {
        let llm = llm::create_client(&config)?;
        Ok(Self::with_client(config, llm))
    }

    /// Build state around an already-constructed client. This is the seam
    /// tests use to swap the backend for a double.
    pub fn with_client(config: Config, llm: Arc<dyn CompletionClient>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.system_prompt.clone()));
        Self {
            config: Arc::new(config),
            sessions,
            llm,
        }
    }
}
