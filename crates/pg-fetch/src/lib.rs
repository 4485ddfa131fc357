//! Catalog client for pokegreet.
//!
//! A [`CatalogSource`] turns an id into a [`Record`]. [`PokeApiClient`] is
//! the production source; [`fetch_with_retry`] wraps any source in the
//! bounded retry loop a scheduled run relies on.

/// Blocking PokéAPI client.
pub mod client;
/// Error types for catalog retrieval.
pub mod error;
/// Bounded retry with linear backoff.
pub mod retry;

use pg_core::Record;

/// Re-export the HTTP client and its configuration.
pub use client::{FetchConfig, PokeApiClient};
/// Re-export error types.
pub use error::{FetchError, FetchResult};
/// Re-export retry helpers.
pub use retry::{RetryPolicy, fetch_with_retry};

/// Something that can look up a creature by id.
pub trait CatalogSource {
    /// Retrieve the record for `id` with a single attempt.
    fn fetch(&self, id: u32) -> FetchResult<Record>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn fetch(&self, id: u32) -> FetchResult<Record> {
        (**self).fetch(id)
    }
}
