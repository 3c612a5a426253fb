//! REST Countries Client - Implementation of CountryDirectory for the
//! restcountries v2 API.
//!
//! Endpoints used:
//!
//! - `GET {base}/name/{name}` - countries matching a (partial) name
//! - `GET {base}/regionalbloc/{code}` - members of a regional bloc
//!
//! Both return a JSON array of country records; a lookup without matches
//! answers `404 {"status":404,"message":"Not Found"}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::Country;
use crate::ports::{CountryDirectory, CountryDirectoryError};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the REST Countries client.
#[derive(Debug, Clone)]
pub struct RestCountriesConfig {
    /// Base URL of the API (default: https://restcountries.eu/rest/v2).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RestCountriesConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RestCountriesConfig {
    fn default() -> Self {
        Self::new("https://restcountries.eu/rest/v2")
    }
}

/// REST Countries API client.
pub struct RestCountriesClient {
    config: RestCountriesConfig,
    base_url: Url,
    client: Client,
}

impl RestCountriesClient {
    pub fn new(config: RestCountriesConfig) -> Result<Self, CountryDirectoryError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CountryDirectoryError::InvalidRequest(format!("Invalid base URL: {}", e))
        })?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CountryDirectoryError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds `{base}/{resource}/{key}`, percent-encoding the key.
    fn endpoint(&self, resource: &str, key: &str) -> Result<Url, CountryDirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CountryDirectoryError::InvalidRequest("Base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([resource, key]);
        Ok(url)
    }

    async fn fetch(&self, url: Url, lookup: &str) -> Result<Vec<Country>, CountryDirectoryError> {
        tracing::debug!(%url, "Fetching countries");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                CountryDirectoryError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                CountryDirectoryError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CountryDirectoryError::NotFound(lookup.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CountryDirectoryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<RestCountry> = response
            .json()
            .await
            .map_err(|e| CountryDirectoryError::parse(format!("Failed to parse countries: {}", e)))?;

        tracing::debug!(count = records.len(), "Fetched countries");
        Ok(records.into_iter().map(Country::from).collect())
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn by_name(&self, name: &str) -> Result<Vec<Country>, CountryDirectoryError> {
        let url = self.endpoint("name", name)?;
        self.fetch(url, name).await
    }

    async fn by_regional_bloc(&self, code: &str) -> Result<Vec<Country>, CountryDirectoryError> {
        let url = self.endpoint("regionalbloc", code)?;
        self.fetch(url, code).await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestCountry {
    name: Option<String>,
    capital: Option<String>,
    regional_blocs: Option<Vec<RestRegionalBloc>>,
}

#[derive(Debug, Deserialize)]
struct RestRegionalBloc {
    acronym: String,
}

impl From<RestCountry> for Country {
    fn from(record: RestCountry) -> Self {
        Self {
            name: record.name,
            capital: record.capital,
            regional_blocs: record
                .regional_blocs
                .unwrap_or_default()
                .into_iter()
                .map(|bloc| bloc.acronym)
                .collect(),
        }
    }
}
