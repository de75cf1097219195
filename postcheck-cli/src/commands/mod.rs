//! Command handlers -- one module per subcommand

pub mod cleanup;
pub mod config;
pub mod ping;
