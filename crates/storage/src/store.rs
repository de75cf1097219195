//! The storage channel as seen by fixtures.
//!
//! [`PostStore`] abstracts the few storage operations the factory and cleanup
//! registry need, so they can run against [`StorageGateway`] in live scenarios
//! and against an in-memory store in their own unit tests.

use std::future::Future;

use crate::error::GatewayError;
use crate::gateway::{RawPost, StorageGateway};

/// Storage operations used by test-data fixtures.
///
/// # Implementations
///
/// - [`StorageGateway`]: the live MySQL posts table
pub trait PostStore: Send + Sync + 'static {
    /// Whether a row with this id is present.
    fn exists(&self, id: u64) -> impl Future<Output = Result<bool, GatewayError>> + Send;

    /// Deletes the row and commits. Callers check existence first.
    fn delete(&self, id: u64) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Inserts a row bypassing the API and returns the generated id.
    fn insert_raw(
        &self,
        post: &RawPost,
    ) -> impl Future<Output = Result<u64, GatewayError>> + Send;

    /// Releases any held connection. Safe to call repeatedly.
    fn close(&self) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

impl PostStore for StorageGateway {
    async fn exists(&self, id: u64) -> Result<bool, GatewayError> {
        StorageGateway::exists(self, id).await
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        StorageGateway::delete(self, id).await
    }

    async fn insert_raw(&self, post: &RawPost) -> Result<u64, GatewayError> {
        StorageGateway::insert_raw(self, post).await
    }

    async fn close(&self) -> Result<(), GatewayError> {
        StorageGateway::close(self).await
    }
}
