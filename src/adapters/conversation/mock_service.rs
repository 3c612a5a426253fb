//! Mock Conversation Service for testing.
//!
//! Returns pre-configured responses (consumed in order) and records every
//! request so tests can assert on what was, or was not, sent.
//!
//! # Example
//!
//! ```ignore
//! let service = MockConversationService::new()
//!     .with_response(ConversationResponse::with_text("Hello!"));
//!
//! let response = service.message(request).await?;
//! assert_eq!(service.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{ConversationRequest, ConversationResponse};
use crate::ports::{ConversationError, ConversationService};

/// Mock conversation service for testing.
#[derive(Debug, Clone, Default)]
pub struct MockConversationService {
    /// Pre-configured outcomes (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<ConversationResponse, ConversationError>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<ConversationRequest>>>,
}

impl MockConversationService {
    /// Creates a new mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, response: ConversationResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: ConversationError) -> Self {
        self.push(Err(error));
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<ConversationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, outcome: Result<ConversationResponse, ConversationError>) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    /// Gets the next outcome, or an empty-text response when none is queued.
    fn next_response(&self) -> Result<ConversationResponse, ConversationError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ConversationResponse::with_text("")))
    }
}

#[async_trait]
impl ConversationService for MockConversationService {
    async fn message(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationResponse, ConversationError> {
        self.calls.lock().unwrap().push(request);
        self.next_response()
    }
}
