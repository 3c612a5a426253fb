//! Country records as returned by the country data API.

use std::collections::BTreeSet;

/// A country record. Fetched per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Country {
    /// Common name. The upstream occasionally reports `null`.
    pub name: Option<String>,
    /// Capital city, if the upstream knows one.
    pub capital: Option<String>,
    /// Acronyms of the regional blocs the country belongs to (e.g. "EU").
    pub regional_blocs: BTreeSet<String>,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    pub fn with_regional_bloc(mut self, acronym: impl Into<String>) -> Self {
        self.regional_blocs.insert(acronym.into());
        self
    }

    pub fn belongs_to(&self, bloc: &str) -> bool {
        self.regional_blocs.contains(bloc)
    }
}
