//! Intent-driven response enrichment rules.
//!
//! [`route`] decides what, if anything, should be done with a conversation
//! response. The fetching itself lives in the application layer; everything
//! here is pure.

use serde::Deserialize;

use super::conversation::{ConversationResponse, Entity};
use super::country::Country;

/// Intent asking for the member states of the European Union.
pub const COUNTRIES_INTENT: &str = "countries";
/// Intent asking for the capital of a country.
pub const CAPITAL_INTENT: &str = "capital";

/// Placeholder the dialog puts where the member list belongs.
pub const COUNTRIES_TOKEN: &str = "{countries}";
/// Placeholder the dialog puts where the capital belongs.
pub const CAPITAL_TOKEN: &str = "{capital}";

/// What to do with a conversation response.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    /// The response has no `output`; give it an empty one and stop.
    InitializeOutput,
    /// Substitute the regional bloc member list for `{countries}`.
    Countries,
    /// Substitute a capital for `{capital}`, with the first extracted entity.
    Capital(Option<Entity>),
    /// Return the response as is.
    PassThrough,
}

/// Routes a response on its top-ranked intent.
pub fn route(response: &ConversationResponse) -> Enrichment {
    if response.output.is_none() {
        return Enrichment::InitializeOutput;
    }

    match response.top_intent() {
        Some(intent) if intent.name() == Some(COUNTRIES_INTENT) => Enrichment::Countries,
        Some(intent) if intent.name() == Some(CAPITAL_INTENT) => {
            Enrichment::Capital(response.first_entity().cloned())
        }
        _ => Enrichment::PassThrough,
    }
}

/// How the capital lookup chooses the country to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalLookup {
    /// Always query the configured default country; the entity is only logged.
    #[default]
    Fixed,
    /// Query the first extracted entity's value, falling back to the default.
    Entity,
}

impl CapitalLookup {
    /// Picks the country name to look up.
    pub fn country_name<'a>(&self, entity: Option<&'a Entity>, default: &'a str) -> &'a str {
        match (*self, entity.and_then(Entity::value)) {
            (CapitalLookup::Entity, Some(value)) if !value.trim().is_empty() => value,
            _ => default,
        }
    }
}

/// Names of all countries, each followed by a space, in the order given.
///
/// Countries without a name are skipped.
pub fn country_names(countries: &[Country]) -> String {
    countries
        .iter()
        .filter_map(|country| country.name.as_deref())
        .fold(String::new(), |mut joined, name| {
            joined.push_str(name);
            joined.push(' ');
            joined
        })
}

/// Capital of the first matching country.
pub fn first_capital(countries: &[Country]) -> Option<&str> {
    countries.first().and_then(|country| country.capital.as_deref())
}
