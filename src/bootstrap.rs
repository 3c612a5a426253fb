//! Startup wiring: configuration in, ready-to-serve router out.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::adapters::conversation::{WatsonConfig, WatsonConversationClient};
use crate::adapters::countries::{RestCountriesClient, RestCountriesConfig};
use crate::adapters::http::{app_router, MessageAppState};
use crate::application::{EnrichmentSettings, ResponseEnricher, SendMessageHandler};
use crate::config::{AppConfig, CountriesConfig, ValidationError};
use crate::ports::{ConversationError, CountryDirectoryError};

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("conversation client: {0}")]
    Conversation(#[from] ConversationError),

    #[error("country data client: {0}")]
    Countries(#[from] CountryDirectoryError),
}

impl From<&CountriesConfig> for EnrichmentSettings {
    fn from(config: &CountriesConfig) -> Self {
        Self {
            capital_lookup: config.capital_lookup,
            default_capital_country: config.default_capital_country.clone(),
            regional_bloc: config.regional_bloc.clone(),
        }
    }
}

/// Builds the clients and the message handler from configuration.
pub fn build_state(config: &AppConfig) -> Result<MessageAppState, StartupError> {
    let endpoint = config.conversation.endpoint()?;
    let mut watson = WatsonConfig::new(endpoint.url.clone())
        .with_version_date(config.conversation.version_date.clone())
        .with_timeout(config.conversation.timeout());
    match endpoint.credentials {
        Some(credentials) => {
            watson = watson.with_secret_credentials(credentials.username, credentials.password);
        }
        None => {
            tracing::warn!("No conversation service credentials configured; requests will be unauthenticated");
        }
    }
    let conversation = WatsonConversationClient::new(watson)?;

    let countries = RestCountriesClient::new(
        RestCountriesConfig::new(config.countries.base_url.clone())
            .with_timeout(config.countries.timeout()),
    )?;

    let workspace = config.conversation.workspace();
    if let Err(ref reason) = workspace {
        tracing::warn!("Workspace unavailable ({}); every message will get the setup notice", reason);
    }

    let enricher = ResponseEnricher::new(
        Arc::new(countries),
        EnrichmentSettings::from(&config.countries),
    );
    let handler = SendMessageHandler::new(Arc::new(conversation), enricher, workspace);

    tracing::info!(
        conversation_url = %endpoint.url,
        countries_url = %config.countries.base_url,
        capital_lookup = ?config.countries.capital_lookup,
        "Message handler ready"
    );

    Ok(MessageAppState::new(Arc::new(handler)))
}

/// Builds the complete router from configuration.
pub fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(config)?;
    Ok(app_router(state, &config.server))
}
