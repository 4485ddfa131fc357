//! CLI frontend for pokegreet: rewrites a README with a random Pokémon greeting.

mod commands;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pg_core::GreeterConfig;
use pg_fetch::{FetchConfig, RetryPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pokegreet",
    about = "pokegreet — greet README visitors with a random Pokémon",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a Pokémon, rewrite the README, and record the pick (default)
    Run,

    /// Print a greeting card to stdout without touching any file
    Preview,

    /// Show recently greeted Pokémon
    History,
}

#[derive(Args)]
struct Options {
    /// README file to overwrite
    #[arg(long, global = true, env = "POKEGREET_README", default_value = "./README.md")]
    readme: PathBuf,

    /// JSON file holding past picks
    #[arg(
        long,
        global = true,
        env = "POKEGREET_HISTORY",
        default_value = "./pokemon_history.json"
    )]
    history: PathBuf,

    /// Number of past picks to keep
    #[arg(long, global = true, env = "POKEGREET_HISTORY_SIZE", default_value = "100")]
    history_size: usize,

    /// Highest Pokédex number to draw from
    #[arg(long, global = true, env = "POKEGREET_MAX_ID", default_value = "1025")]
    max_id: u32,

    /// Catalog endpoint; the id is appended as a path segment
    #[arg(
        long,
        global = true,
        env = "POKEGREET_API_URL",
        default_value = pg_fetch::client::DEFAULT_API_URL
    )]
    api_url: String,

    /// Fetch attempts before giving up
    #[arg(long, global = true, env = "POKEGREET_RETRIES", default_value = "3")]
    retries: u32,

    /// Base pause between fetch attempts, grows linearly
    #[arg(long, global = true, env = "POKEGREET_RETRY_DELAY_MS", default_value = "2000")]
    retry_delay_ms: u64,

    /// Timeout for a single request
    #[arg(long, global = true, env = "POKEGREET_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// RNG seed for a reproducible pick (default: OS entropy)
    #[arg(long, global = true, env = "POKEGREET_SEED")]
    seed: Option<u64>,
}

impl Options {
    fn greeter_config(&self) -> GreeterConfig {
        GreeterConfig::default()
            .with_readme(&self.readme)
            .with_history(&self.history)
            .with_history_size(self.history_size)
            .with_max_id(self.max_id)
            .with_seed(self.seed)
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_api_url(&self.api_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(RetryPolicy::new(
                self.retries,
                Duration::from_millis(self.retry_delay_ms),
            ))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.options.greeter_config();
    let fetch = cli.options.fetch_config();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&config, &fetch),
        Commands::Preview => commands::preview::run(&config, &fetch),
        Commands::History => {
            commands::history::run(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(step = %e.step(), id = ?e.id(), "run failed");
        eprintln!("{:?}", miette::Report::new(e));
        process::exit(1);
    }
}
