use pg_cli::RunResult;
use pg_core::GreeterConfig;
use pg_fetch::FetchConfig;

pub fn run(config: &GreeterConfig, fetch: &FetchConfig) -> RunResult<()> {
    let mut greeter = super::greeter(config, fetch)?;
    let greeting = greeter.preview()?;
    print!("{}", greeting.content);
    Ok(())
}
