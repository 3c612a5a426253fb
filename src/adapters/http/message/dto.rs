//! HTTP DTOs for the message endpoint.
//!
//! Responses are the conversation service's own document (see
//! [`crate::domain::ConversationResponse`]); only the request needs a DTO.

use serde::Deserialize;

use crate::application::SendMessageCommand;
use crate::domain::JsonObject;

/// Request body for `POST /api/message`.
///
/// Both fields are optional; missing or `null` values become empty objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub context: Option<JsonObject>,
    #[serde(default)]
    pub input: Option<JsonObject>,
}

impl From<SendMessageRequest> for SendMessageCommand {
    fn from(request: SendMessageRequest) -> Self {
        Self {
            context: request.context.unwrap_or_default(),
            input: request.input.unwrap_or_default(),
        }
    }
}
