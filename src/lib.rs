//! Session-scoped chat agent: an HTTP service that forwards user messages to
//! a completion backend (OpenAI or a local Ollama service), keeps short-lived
//! conversation history in process memory, and short-circuits escalation
//! requests with a canned reply.

pub mod chat;
pub mod config;
pub mod error;
pub mod escalation;
pub mod llm;
pub mod routes;
pub mod session;
pub mod state;

pub use config::{Config, Provider};
pub use error::AgentError;
pub use llm::CompletionClient;
pub use routes::create_routes;
pub use session::{Role, Session, SessionStore, Turn};
pub use state::AppState;
