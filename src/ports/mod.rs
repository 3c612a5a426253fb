//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationService` - The conversational-AI message API
//! - `CountryDirectory` - The public country data API

mod conversation_service;
mod country_directory;

pub use conversation_service::{ConversationError, ConversationService};
pub use country_directory::{CountryDirectory, CountryDirectoryError};
