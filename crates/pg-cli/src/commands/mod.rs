pub mod history;
pub mod preview;
pub mod run;

use pg_cli::{Greeter, RunError, RunResult};
use pg_core::{GreeterConfig, JsonFileStore};
use pg_fetch::{FetchConfig, PokeApiClient};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build a greeter wired to PokéAPI and the configured history file.
fn greeter(
    config: &GreeterConfig,
    fetch: &FetchConfig,
) -> RunResult<Greeter<PokeApiClient, JsonFileStore, StdRng>> {
    let client = PokeApiClient::new(fetch).map_err(RunError::Setup)?;
    let store = JsonFileStore::new(&config.history_path, config.history_size);
    Ok(Greeter::new(client, store, rng_for(config), config.selector()).with_retry(fetch.retry))
}

/// Seeded RNG when a seed is configured, OS entropy otherwise.
fn rng_for(config: &GreeterConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
