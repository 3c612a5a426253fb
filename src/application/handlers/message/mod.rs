//! Message handlers - one chat turn through the conversation service and
//! the country enrichment.

mod enrich_response;
mod send_message;

pub use enrich_response::{EnrichmentSettings, ResponseEnricher};
pub use send_message::{SendMessageCommand, SendMessageHandler};
