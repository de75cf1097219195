//! Logging initialization for harness processes.
//!
//! Configures `tracing-subscriber` from [`GeneralConfig`]. `RUST_LOG`, when
//! set, takes precedence over the configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use postcheck_core::config::GeneralConfig;

use crate::error::FixtureError;

/// Installs the global tracing subscriber.
///
/// Fails if a subscriber is already installed, so test binaries that call
/// this from several tests should ignore the error after the first call.
///
/// # Formats
///
/// * `"json"` - one JSON object per line
/// * `"pretty"` - human-readable multi-line output
pub fn init_tracing(config: &GeneralConfig) -> Result<(), FixtureError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| FixtureError::Logging(format!("json subscriber: {e}"))),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .map_err(|e| FixtureError::Logging(format!("pretty subscriber: {e}"))),
        other => Err(FixtureError::Logging(format!(
            "unknown log format '{other}', expected 'json' or 'pretty'"
        ))),
    }
}
