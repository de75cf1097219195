//! Storage gateway error type.

use postcheck_core::error::PostcheckError;

/// Errors raised by the storage gateway.
///
/// Nothing here is retried: a failure on the storage channel fails the test.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Opening or closing the connection failed
    #[error("storage connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement was rejected or the connection dropped mid-query
    #[error("storage query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A column value has a type the gateway cannot map to JSON
    #[error("cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// The result set does not have the expected shape
    #[error("unexpected storage result: {0}")]
    Unexpected(String),
}

impl From<GatewayError> for PostcheckError {
    fn from(err: GatewayError) -> Self {
        PostcheckError::Storage(err.to_string())
    }
}
