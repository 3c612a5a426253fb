//! Domain layer containing the message types and enrichment rules.
//!
//! # Module Organization
//!
//! - `conversation` - Requests and responses of the conversation service
//! - `country` - Country records from the country data API
//! - `enrichment` - Intent routing and placeholder substitution
//! - `workspace` - Validated workspace identifier

pub mod conversation;
pub mod country;
pub mod enrichment;
pub mod workspace;

pub use conversation::{
    ConversationRequest, ConversationResponse, Entity, Intent, JsonObject, Output,
};
pub use country::Country;
pub use enrichment::{CapitalLookup, Enrichment};
pub use workspace::{WorkspaceError, WorkspaceId};
