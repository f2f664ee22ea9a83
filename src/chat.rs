use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AgentError;
use crate::escalation::{self, ESCALATION_RESPONSE};
use crate::session::Turn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub escalation_triggered: bool,
    pub model: String,
    pub timestamp: String,
}

/// Process one chat turn: resolve the session, short-circuit on escalation,
/// otherwise delegate to the completion backend, then record both turns.
///
/// The session stays locked for the whole turn, so concurrent requests for
/// the same conversation id are serialized while other conversations keep
/// flowing.
pub async fn process_chat(state: &AppState, request: ChatRequest) -> Result<ChatResponse, AgentError> {
    if request.message.trim().is_empty() {
        return Err(AgentError::Validation("message must not be empty".into()));
    }

    let (conversation_id, session) = state
        .sessions
        .get_or_create(request.conversation_id.as_deref());
    let mut session = session.lock().await;

    info!(conversation_id = %conversation_id, "processing chat message");

    let escalation_triggered =
        escalation::is_escalation(&request.message, &state.config.escalation_keywords);

    let response_text = if escalation_triggered {
        info!(conversation_id = %conversation_id, "escalation triggered");
        ESCALATION_RESPONSE.to_string()
    } else {
        // Trimmed history plus the new user turn, in chronological order.
        let mut transcript = session.turns.clone();
        transcript.push(Turn::user(request.message.clone()));

        // On failure the turn never completed; nothing is recorded.
        state.llm.generate(&transcript).await?
    };

    session.append(
        [
            Turn::user(request.message),
            Turn::assistant(response_text.clone()),
        ],
        state.config.max_history,
    );

    Ok(ChatResponse {
        response: response_text,
        conversation_id,
        escalation_triggered,
        model: state.llm.model_name().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
