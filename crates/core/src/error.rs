//! Error types shared across the postcheck crates.
//!
//! Each channel crate keeps its own detailed error (`GatewayError`, `ClientError`,
//! `FixtureError`) and converts into [`PostcheckError`] so binaries can use `?`
//! across crate boundaries.

/// Top-level postcheck error.
#[derive(Debug, thiserror::Error)]
pub enum PostcheckError {
    /// Configuration could not be loaded or validated.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage channel failure (connection, query, decode).
    #[error("storage error: {0}")]
    Storage(String),

    /// API channel failure (transport, timeout, decode).
    #[error("api error: {0}")]
    Api(String),

    /// Fixture setup or teardown failure.
    #[error("fixture error: {0}")]
    Fixture(String),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or more required environment variables are absent or empty.
    ///
    /// Every missing name is reported at once.
    #[error("missing required environment variables: {}", names.join(", "))]
    MissingVars { names: Vec<String> },

    /// A variable is present but its value is unusable.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
