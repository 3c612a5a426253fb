//! HTTP handlers for the message endpoint.
//!
//! These handlers connect Axum routes to application layer operations.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::SendMessageHandler;
use crate::domain::ConversationResponse;
use crate::ports::ConversationError;

use super::dto::SendMessageRequest;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for message handlers.
#[derive(Clone)]
pub struct MessageAppState {
    pub handler: Arc<SendMessageHandler>,
}

impl MessageAppState {
    pub fn new(handler: Arc<SendMessageHandler>) -> Self {
        Self { handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/message
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/message - Send one chat turn.
///
/// Returns the (possibly enriched) conversation service response.
///
/// # Errors
/// - Any status the conversation service answered with, and its error body
/// - 500 Internal Server Error: the service could not be reached or understood
pub async fn send_message(
    State(state): State<MessageAppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ConversationResponse>, MessageApiError> {
    let response = state
        .handler
        .handle(request.into())
        .await
        .map_err(MessageApiError::Conversation)?;

    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts conversation failures to HTTP responses.
#[derive(Debug)]
pub enum MessageApiError {
    Conversation(ConversationError),
}

impl IntoResponse for MessageApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            MessageApiError::Conversation(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!("Conversation service error: {}", err);
                } else {
                    tracing::warn!("Conversation service rejected the message: {}", err);
                }
                (status, Json(err.to_body())).into_response()
            }
        }
    }
}
