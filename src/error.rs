use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error taxonomy for the chat agent.
///
/// Every failure mode maps to exactly one variant so callers can tell an
/// unreachable local backend apart from a backend that answered badly.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("conversation not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("{service} is unavailable: {hint}")]
    Unavailable { service: String, hint: String },
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AgentError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION"),
            AgentError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AgentError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            AgentError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            AgentError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
        };

        let body = serde_json::json!({
            "error": ApiError {
                code: code.to_string(),
                message: self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AgentError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AgentError::NotFound("conv_1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AgentError::Validation("empty message".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AgentError::Upstream("HTTP 500".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unavailable_distinct_from_upstream() {
        let unavailable = status_of(AgentError::Unavailable {
            service: "ollama".into(),
            hint: "start it".into(),
        });
        let upstream = status_of(AgentError::Upstream("boom".into()));
        assert_eq!(unavailable, StatusCode::SERVICE_UNAVAILABLE);
        assert_ne!(unavailable, upstream);
    }
}
