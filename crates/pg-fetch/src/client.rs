//! Blocking PokéAPI client.

use std::time::Duration;

use pg_core::Record;
use pg_core::record::ApiPokemon;
use reqwest::blocking::Client;

use crate::CatalogSource;
use crate::error::{FetchError, FetchResult};
use crate::retry::RetryPolicy;

/// Base URL of the PokéAPI `pokemon` resource.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for talking to the catalog.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Resource base URL; the id is appended as a path segment.
    pub api_url: String,
    /// Timeout for a single request.
    pub timeout: Duration,
    /// Retry budget for a fetch.
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl FetchConfig {
    /// Set the base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Fetches records from PokéAPI (or anything serving the same schema).
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Build a client from `config`.
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pokegreet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// The resource URL for `id`.
    pub fn url_for(&self, id: u32) -> String {
        format!("{}/{id}", self.base_url)
    }
}

impl CatalogSource for PokeApiClient {
    fn fetch(&self, id: u32) -> FetchResult<Record> {
        let url = self.url_for(id);
        tracing::debug!(%url, "requesting record");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network {
                id,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| FetchError::Network {
            id,
            message: e.to_string(),
        })?;

        decode(id, &body)
    }
}

/// Decode a catalog response body into a record.
pub fn decode(id: u32, body: &str) -> FetchResult<Record> {
    let payload: ApiPokemon = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        id,
        message: e.to_string(),
    })?;
    Ok(payload.into())
}
