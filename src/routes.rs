use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::chat::{self, ChatRequest, ChatResponse};
use crate::error::AgentError;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/chat", post(chat_handler))
        .route(
            "/conversations/:id",
            get(get_conversation).delete(delete_conversation),
        )
        .route("/stats", get(get_stats))
        .route("/models", get(list_models))
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Chatbot Agent API",
        "status": "running",
        "provider": state.config.provider.to_string(),
        "model": state.llm.model_name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AgentError> {
    let response = chat::process_chat(&state, request).await?;
    Ok(Json(response))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AgentError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AgentError::NotFound(id.clone()))?;
    let session = session.lock().await;

    Ok(Json(json!({
        "conversation_id": id,
        "messages": session.turns,
        "message_count": session.turns.len(),
    })))
}

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AgentError> {
    if !state.sessions.delete(&id) {
        return Err(AgentError::NotFound(id));
    }
    info!(conversation_id = %id, "cleared conversation");
    Ok(Json(json!({
        "message": format!("Conversation {} cleared", id),
    })))
}

async fn get_stats(State(state): State<AppState>) -> Json<Value> {
    let stats = state.sessions.stats().await;
    Json(json!({
        "total_conversations": stats.total_conversations,
        "total_messages": stats.total_messages,
        "active_conversations": stats.total_conversations,
        "model": state.llm.model_name(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, AgentError> {
    let models = state.llm.list_models().await?;
    Ok(Json(models))
}
