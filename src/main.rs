use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use envtree::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use envtree::env::EnvSnapshot;
use envtree::error::AppResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  Caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    let settings = load_and_merge_config(cli)?;
    init_logger_from_settings(&settings)?;
    tracing::debug!(version = envtree::pkg_version(), "envtree starting");

    let env = EnvSnapshot::from_process();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command(cli, &settings, &env, &mut out)
}
