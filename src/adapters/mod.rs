//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `conversation` - Conversation service clients
//! - `countries` - Country data API clients
//! - `http` - Axum HTTP surface

pub mod conversation;
pub mod countries;
pub mod http;

pub use conversation::{MockConversationService, WatsonConfig, WatsonConversationClient};
pub use countries::{InMemoryCountryDirectory, RestCountriesClient, RestCountriesConfig};
