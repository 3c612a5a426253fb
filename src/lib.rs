//! Country Chat - Conversation backend with country data enrichment
//!
//! Relays chat turns to a conversational-AI service and fills the
//! `{countries}` and `{capital}` placeholders of its answers with data from
//! a public country API.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
