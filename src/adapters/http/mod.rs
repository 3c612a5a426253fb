//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own HTTP adapter; `app` assembles them with
//! the health probe, the static UI and the middleware stack.

pub mod app;
pub mod message;

// Re-export key types for convenience
pub use app::{app_router, health, HealthResponse};
pub use message::{message_router, MessageAppState};
