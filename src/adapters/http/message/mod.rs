//! HTTP adapter for the message endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::SendMessageRequest;
pub use handlers::{MessageApiError, MessageAppState};
pub use routes::{message_router, message_routes};
