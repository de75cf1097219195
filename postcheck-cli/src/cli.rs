//! CLI argument parsing using clap derive API
//!
//! Purely declarative; no side effects or I/O.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// postcheck -- operator tool for the posts API end-to-end harness.
///
/// Connection settings come from the same environment variables the test
/// scenarios read (see `postcheck.env.example`).
#[derive(Parser, Debug)]
#[command(name = "postcheck", version, about, long_about = None)]
pub struct Cli {
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect the harness configuration.
    Config(ConfigArgs),

    /// Check that the API and the database are reachable.
    Ping(PingArgs),

    /// Delete leftover test posts by id, skipping ids already gone.
    Cleanup(CleanupArgs),
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Load and validate the configuration, listing every problem found.
    Validate,
    /// Show the effective configuration with passwords masked.
    Show {
        /// Show only one section (general, api, database).
        #[arg(long)]
        section: Option<String>,
    },
}

// ---- ping ----

#[derive(Args, Debug)]
pub struct PingArgs {
    /// Only probe the database.
    #[arg(long, conflicts_with = "api_only")]
    pub db_only: bool,

    /// Only probe the API.
    #[arg(long)]
    pub api_only: bool,
}

// ---- cleanup ----

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Post ids to delete, in order.
    #[arg(required = true, num_args = 1.., value_delimiter = ',')]
    pub ids: Vec<u64>,

    /// Report which ids exist without deleting anything.
    #[arg(long)]
    pub dry_run: bool,
}
