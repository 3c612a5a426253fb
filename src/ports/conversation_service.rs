//! Conversation Service Port - Interface for the conversational-AI message API.
//!
//! The service classifies the user's input into intents, extracts entities and
//! runs the dialog, returning the next output text. It is treated as an opaque
//! request/response API.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoService;
//!
//! #[async_trait]
//! impl ConversationService for EchoService {
//!     async fn message(
//!         &self,
//!         request: ConversationRequest,
//!     ) -> Result<ConversationResponse, ConversationError> {
//!         Ok(ConversationResponse::with_text("echo"))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{ConversationRequest, ConversationResponse};

/// Port for sending a message turn to the conversation service.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Sends one dialog turn and returns the service's response.
    async fn message(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationResponse, ConversationError>;
}

/// Conversation service errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversationError {
    /// The service answered with a non-success status.
    #[error("conversation service returned status {status}")]
    Upstream {
        /// HTTP status reported by the service.
        status: u16,
        /// Error document reported by the service.
        body: Value,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ConversationError {
    /// Status code used when the error has none of its own.
    pub const DEFAULT_STATUS: u16 = 500;

    /// Creates an upstream error.
    pub fn upstream(status: u16, body: Value) -> Self {
        Self::Upstream { status, body }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// HTTP status to report to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ConversationError::Upstream { status, .. } => *status,
            _ => Self::DEFAULT_STATUS,
        }
    }

    /// JSON document to report to the caller.
    ///
    /// Upstream error documents are returned verbatim.
    pub fn to_body(&self) -> Value {
        match self {
            ConversationError::Upstream { body, .. } => body.clone(),
            other => json!({
                "error": other.to_string(),
                "code": other.status_code(),
            }),
        }
    }
}
