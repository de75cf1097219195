//! CLI-specific error types and exit code mapping

use postcheck_client::ClientError;
use postcheck_core::error::{ConfigError, PostcheckError};
use postcheck_fixtures::FixtureError;
use postcheck_storage::GatewayError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The API or the database could not be reached.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from postcheck-core.
    #[error("{0}")]
    Core(#[from] PostcheckError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                       |
    /// |------|-------------------------------|
    /// | 0    | Success                       |
    /// | 1    | General / command error       |
    /// | 2    | Configuration error           |
    /// | 3    | API or database unreachable   |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(PostcheckError::Config(_)) => 2,
            Self::Unreachable(_) => 3,
            Self::JsonSerialize(_) | Self::Io(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<GatewayError> for CliError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Connection(_) => Self::Unreachable(e.to_string()),
            other => Self::Command(other.to_string()),
        }
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Request { .. } => Self::Unreachable(e.to_string()),
            ClientError::InvalidUrl { .. } => Self::Config(e.to_string()),
            other => Self::Command(other.to_string()),
        }
    }
}

impl From<FixtureError> for CliError {
    fn from(e: FixtureError) -> Self {
        match e {
            FixtureError::Storage(inner) => inner.into(),
            FixtureError::Api(inner) => inner.into(),
            other => Self::Command(other.to_string()),
        }
    }
}
