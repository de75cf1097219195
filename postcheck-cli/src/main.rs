//! postcheck -- operator CLI for the posts API end-to-end harness.

mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use postcheck_core::config::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, GeneralConfig};
use postcheck_fixtures::init_tracing;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

/// CLI default; harness logs at `info` are noise for one-shot commands.
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    // A `.env` in the working directory fills in whatever the shell left unset.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let general = logging_config(cli.log_level.as_deref());
    init_tracing(&general).context("failed to initialize logging")?;

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &writer)?,
        Commands::Ping(args) => commands::ping::execute(args, &writer).await?,
        Commands::Cleanup(args) => commands::cleanup::execute(args, &writer).await?,
    }
    Ok(())
}

/// Logging settings are read on their own so `config validate` can still log
/// when the rest of the configuration is broken.
fn logging_config(level_override: Option<&str>) -> GeneralConfig {
    let from_env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
    GeneralConfig {
        log_level: level_override
            .map(str::to_owned)
            .or_else(|| from_env(ENV_LOG_LEVEL))
            .unwrap_or_else(|| DEFAULT_CLI_LOG_LEVEL.to_owned()),
        log_format: from_env(ENV_LOG_FORMAT).unwrap_or_else(|| GeneralConfig::default().log_format),
    }
}
