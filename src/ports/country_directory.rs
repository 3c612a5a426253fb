//! Country Directory Port - Interface for the public country data API.
//!
//! Two read-only lookups are needed: by (partial) country name and by
//! regional bloc acronym. Both return the matching countries in the order the
//! source reports them.

use async_trait::async_trait;

use crate::domain::Country;

/// Port for country lookups.
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Countries whose name matches `name`.
    async fn by_name(&self, name: &str) -> Result<Vec<Country>, CountryDirectoryError>;

    /// Countries belonging to the regional bloc with acronym `code` (e.g. "EU").
    async fn by_regional_bloc(&self, code: &str) -> Result<Vec<Country>, CountryDirectoryError>;
}

/// Country directory errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CountryDirectoryError {
    /// Nothing matched the lookup.
    #[error("no countries found for {0}")]
    NotFound(String),

    /// The source answered with an unexpected status.
    #[error("country data API returned status {status}: {message}")]
    Status {
        /// HTTP status.
        status: u16,
        /// Response body, for diagnostics.
        message: String,
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

    /// Failed to parse the response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The lookup could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CountryDirectoryError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
