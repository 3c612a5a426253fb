//! Country Directory Adapters.
//!
//! - `RestCountriesClient` - HTTP client for the restcountries v2 API
//! - `InMemoryCountryDirectory` - Canned directory for testing

mod in_memory_directory;
mod rest_countries;

pub use in_memory_directory::{DirectoryLookup, InMemoryCountryDirectory};
pub use rest_countries::{RestCountriesClient, RestCountriesConfig};
