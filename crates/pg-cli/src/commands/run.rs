use colored::Colorize;

use pg_cli::RunResult;
use pg_core::GreeterConfig;
use pg_fetch::FetchConfig;

pub fn run(config: &GreeterConfig, fetch: &FetchConfig) -> RunResult<()> {
    let mut greeter = super::greeter(config, fetch)?;
    let outcome = greeter.run(&config.readme_path)?;

    println!(
        "  {} {} (#{:03}) in {}",
        "Greeted".bold(),
        outcome.greeting.record.name,
        outcome.greeting.id,
        outcome.readme.display()
    );
    if !outcome.history_saved {
        println!(
            "  {} history at {} was not updated",
            "Warning:".yellow(),
            config.history_path.display()
        );
    }

    Ok(())
}
