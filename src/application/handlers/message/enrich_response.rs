//! ResponseEnricher - Fills intent placeholders with country data.
//!
//! The enricher never fails: when the country lookup does, the failure is
//! logged and the response is returned without substitution.

use std::sync::Arc;

use crate::domain::conversation::{ConversationResponse, Entity, Output};
use crate::domain::enrichment::{
    country_names, first_capital, route, CapitalLookup, Enrichment, CAPITAL_TOKEN,
    COUNTRIES_TOKEN,
};
use crate::ports::CountryDirectory;

/// Lookup settings for the enrichment handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSettings {
    /// How the capital lookup picks its country.
    pub capital_lookup: CapitalLookup,
    /// Country queried by the capital lookup unless an entity is used.
    pub default_capital_country: String,
    /// Regional bloc listed for the countries intent.
    pub regional_bloc: String,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            capital_lookup: CapitalLookup::Fixed,
            default_capital_country: "Poland".to_string(),
            regional_bloc: "EU".to_string(),
        }
    }
}

/// Routes a conversation response to at most one enrichment handler.
pub struct ResponseEnricher {
    directory: Arc<dyn CountryDirectory>,
    settings: EnrichmentSettings,
}

impl ResponseEnricher {
    pub fn new(directory: Arc<dyn CountryDirectory>, settings: EnrichmentSettings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    pub async fn enrich(&self, mut response: ConversationResponse) -> ConversationResponse {
        match route(&response) {
            Enrichment::InitializeOutput => {
                response.output = Some(Output::default());
                response
            }
            Enrichment::Countries => self.enrich_countries(response).await,
            Enrichment::Capital(entity) => self.enrich_capital(response, entity).await,
            Enrichment::PassThrough => response,
        }
    }

    async fn enrich_countries(&self, mut response: ConversationResponse) -> ConversationResponse {
        let bloc = &self.settings.regional_bloc;

        match self.directory.by_regional_bloc(bloc).await {
            Ok(countries) => {
                let names = country_names(&countries);
                tracing::debug!(%bloc, count = countries.len(), "Substituting regional bloc members");
                response.replace_in_output(COUNTRIES_TOKEN, &names);
            }
            Err(e) => {
                tracing::warn!(%bloc, "Regional bloc lookup failed, answering unenriched: {}", e);
            }
        }

        response
    }

    async fn enrich_capital(
        &self,
        mut response: ConversationResponse,
        entity: Option<Entity>,
    ) -> ConversationResponse {
        tracing::debug!(?entity, "Capital intent");

        let country = self
            .settings
            .capital_lookup
            .country_name(entity.as_ref(), &self.settings.default_capital_country);

        match self.directory.by_name(country).await {
            Ok(countries) => match first_capital(&countries) {
                Some(capital) => {
                    response.replace_in_output(CAPITAL_TOKEN, capital);
                }
                None => {
                    tracing::warn!(%country, "No capital reported, answering unenriched");
                }
            },
            Err(e) => {
                tracing::warn!(%country, "Capital lookup failed, answering unenriched: {}", e);
            }
        }

        response
    }
}
