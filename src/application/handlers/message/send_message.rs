//! SendMessageHandler - Command handler for one chat turn.
//!
//! 1. Refuses to call the conversation service without a usable workspace,
//!    answering with a configuration notice instead.
//! 2. Sends the turn to the conversation service.
//! 3. Enriches the service's response (see [`ResponseEnricher`]).

use std::sync::Arc;

use crate::domain::workspace::WORKSPACE_NOT_CONFIGURED;
use crate::domain::{
    ConversationRequest, ConversationResponse, JsonObject, WorkspaceError, WorkspaceId,
};
use crate::ports::{ConversationError, ConversationService};

use super::enrich_response::ResponseEnricher;

/// Command to send one chat turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendMessageCommand {
    /// Dialog state from the previous turn.
    pub context: JsonObject,
    /// User input.
    pub input: JsonObject,
}

/// Handler for chat turns.
pub struct SendMessageHandler {
    conversation: Arc<dyn ConversationService>,
    enricher: ResponseEnricher,
    workspace: Result<WorkspaceId, WorkspaceError>,
}

impl SendMessageHandler {
    pub fn new(
        conversation: Arc<dyn ConversationService>,
        enricher: ResponseEnricher,
        workspace: Result<WorkspaceId, WorkspaceError>,
    ) -> Self {
        Self {
            conversation,
            enricher,
            workspace,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<ConversationResponse, ConversationError> {
        // 1. Check workspace configuration
        let workspace_id = match &self.workspace {
            Ok(workspace_id) => workspace_id.clone(),
            Err(reason) => {
                tracing::warn!("Not calling the conversation service: {}", reason);
                return Ok(ConversationResponse::with_text(WORKSPACE_NOT_CONFIGURED));
            }
        };

        // 2. Send the turn
        let request = ConversationRequest::new(workspace_id, cmd.context, cmd.input);
        let response = self.conversation.message(request).await?;

        // 3. Enrich
        Ok(self.enricher.enrich(response).await)
    }
}
