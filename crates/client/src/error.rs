//! Resource client error type.

use postcheck_core::error::PostcheckError;

/// Errors raised by the resource client.
///
/// Non-2xx responses are not errors: they come back as an
/// [`ApiResponse`](crate::ApiResponse) and the caller decides.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// Base URL or path does not form a valid URL
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure, including timeouts
    #[error("{method} {url} failed: {source}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not the JSON shape the caller asked for
    #[error("cannot decode {status} response body: {reason}")]
    Decode { status: u16, reason: String },
}

impl ClientError {
    /// Whether the request gave up because the configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_timeout())
    }
}

impl From<ClientError> for PostcheckError {
    fn from(err: ClientError) -> Self {
        PostcheckError::Api(err.to_string())
    }
}
