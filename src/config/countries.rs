//! Country data API configuration

use serde::Deserialize;
use std::time::Duration;

use super::conversation::is_http_url;
use super::error::ValidationError;
use super::server::TIMEOUT_RANGE;
use crate::domain::CapitalLookup;

/// Country data API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CountriesConfig {
    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How the capital lookup picks its country
    #[serde(default)]
    pub capital_lookup: CapitalLookup,

    /// Country queried by the capital lookup unless an entity is used
    #[serde(default = "default_capital_country")]
    pub default_capital_country: String,

    /// Regional bloc listed for the countries intent
    #[serde(default = "default_regional_bloc")]
    pub regional_bloc: String,
}

impl CountriesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate country data API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidCountriesUrl);
        }
        if !TIMEOUT_RANGE.contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            capital_lookup: CapitalLookup::default(),
            default_capital_country: default_capital_country(),
            regional_bloc: default_regional_bloc(),
        }
    }
}

fn default_base_url() -> String {
    "https://restcountries.eu/rest/v2".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_capital_country() -> String {
    "Poland".to_string()
}

fn default_regional_bloc() -> String {
    "EU".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countries_config_defaults() {
        let config = CountriesConfig::default();
        assert_eq!(config.base_url, "https://restcountries.eu/rest/v2");
        assert_eq!(config.capital_lookup, CapitalLookup::Fixed);
        assert_eq!(config.default_capital_country, "Poland");
        assert_eq!(config.regional_bloc, "EU");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = CountriesConfig {
            base_url: "restcountries.eu".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = CountriesConfig {
            timeout_secs: 301,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
