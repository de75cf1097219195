//! Fixture error type.

use postcheck_client::ClientError;
use postcheck_core::error::PostcheckError;
use postcheck_storage::GatewayError;

/// Errors raised while seeding or tearing down test data.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The API refused to create a fixture post
    #[error("failed to create post '{title}': api returned {status}: {body}")]
    Setup {
        title: String,
        status: u16,
        body: String,
    },

    /// A create response carried no usable id
    #[error("create response for '{title}' has no post id")]
    MissingId { title: String },

    /// `register` was called after cleanup ran
    #[error("cannot register post {post_id}: cleanup already ran")]
    RegistryClosed { post_id: u64 },

    /// A factory call came in after cleanup ran; nothing was created
    #[error("cannot create fixture posts: cleanup already ran")]
    ScopeClosed,

    /// `cleanup` was called a second time
    #[error("cleanup already ran")]
    AlreadyCleaned,

    /// Removing a tracked post failed; remaining posts were not attempted
    #[error("teardown failed for post {post_id}: {reason}")]
    Teardown { post_id: u64, reason: String },

    #[error(transparent)]
    Storage(#[from] GatewayError),

    #[error(transparent)]
    Api(#[from] ClientError),

    /// The tracing subscriber could not be installed
    #[error("logging init failed: {0}")]
    Logging(String),
}

impl From<FixtureError> for PostcheckError {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::Storage(e) => e.into(),
            FixtureError::Api(e) => e.into(),
            other => PostcheckError::Fixture(other.to_string()),
        }
    }
}
