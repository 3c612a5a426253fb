//! Conversation Service Adapters.
//!
//! - `WatsonConversationClient` - HTTP client for the Watson message API
//! - `MockConversationService` - Configurable mock for testing

mod mock_service;
mod watson_client;

pub use mock_service::MockConversationService;
pub use watson_client::{WatsonConfig, WatsonConversationClient};
