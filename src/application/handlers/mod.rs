//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod message;

pub use message::{EnrichmentSettings, ResponseEnricher, SendMessageCommand, SendMessageHandler};
