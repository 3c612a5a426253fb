//! In-memory CountryDirectory for testing.
//!
//! Lookups are answered from canned results keyed by the exact lookup string.
//! Unknown keys answer `NotFound`; a configured failure answers every lookup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::Country;
use crate::ports::{CountryDirectory, CountryDirectoryError};

/// A lookup made against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLookup {
    ByName(String),
    ByRegionalBloc(String),
}

/// Canned country directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCountryDirectory {
    by_name: HashMap<String, Vec<Country>>,
    by_bloc: HashMap<String, Vec<Country>>,
    failure: Option<CountryDirectoryError>,
    lookups: Arc<Mutex<Vec<DirectoryLookup>>>,
}

impl InMemoryCountryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `by_name(name)` with `countries`.
    pub fn with_name(mut self, name: impl Into<String>, countries: Vec<Country>) -> Self {
        self.by_name.insert(name.into(), countries);
        self
    }

    /// Answers `by_regional_bloc(code)` with `countries`.
    pub fn with_regional_bloc(mut self, code: impl Into<String>, countries: Vec<Country>) -> Self {
        self.by_bloc.insert(code.into(), countries);
        self
    }

    /// Fails every lookup with `error`.
    pub fn failing(mut self, error: CountryDirectoryError) -> Self {
        self.failure = Some(error);
        self
    }

    /// All lookups made so far.
    pub fn lookups(&self) -> Vec<DirectoryLookup> {
        self.lookups.lock().unwrap().clone()
    }

    fn answer(
        &self,
        lookup: DirectoryLookup,
    ) -> Result<Vec<Country>, CountryDirectoryError> {
        self.lookups.lock().unwrap().push(lookup.clone());

        if let Some(ref error) = self.failure {
            return Err(error.clone());
        }

        let (table, key) = match &lookup {
            DirectoryLookup::ByName(name) => (&self.by_name, name),
            DirectoryLookup::ByRegionalBloc(code) => (&self.by_bloc, code),
        };
        table
            .get(key)
            .cloned()
            .ok_or_else(|| CountryDirectoryError::NotFound(key.clone()))
    }
}

#[async_trait]
impl CountryDirectory for InMemoryCountryDirectory {
    async fn by_name(&self, name: &str) -> Result<Vec<Country>, CountryDirectoryError> {
        self.answer(DirectoryLookup::ByName(name.to_string()))
    }

    async fn by_regional_bloc(&self, code: &str) -> Result<Vec<Country>, CountryDirectoryError> {
        self.answer(DirectoryLookup::ByRegionalBloc(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_canned_lookups_and_records_them() {
        let directory = InMemoryCountryDirectory::new()
            .with_name("Poland", vec![Country::new("Poland").with_capital("Warsaw")])
            .with_regional_bloc("EU", vec![Country::new("France")]);

        assert_eq!(directory.by_name("Poland").await.unwrap().len(), 1);
        assert_eq!(directory.by_regional_bloc("EU").await.unwrap().len(), 1);
        assert_eq!(
            directory.by_name("Atlantis").await.unwrap_err(),
            CountryDirectoryError::NotFound("Atlantis".to_string())
        );
        assert_eq!(
            directory.lookups(),
            vec![
                DirectoryLookup::ByName("Poland".to_string()),
                DirectoryLookup::ByRegionalBloc("EU".to_string()),
                DirectoryLookup::ByName("Atlantis".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failing_directory_fails_everything() {
        let directory = InMemoryCountryDirectory::new()
            .with_regional_bloc("EU", vec![Country::new("France")])
            .failing(CountryDirectoryError::network("down"));

        assert!(directory.by_regional_bloc("EU").await.is_err());
        assert_eq!(directory.lookups().len(), 1);
    }
}
