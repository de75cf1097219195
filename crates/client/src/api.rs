//! The API channel as seen by fixtures.

use std::future::Future;

use postcheck_core::types::{NewPost, PostPatch};

use crate::client::ResourceClient;
use crate::error::ClientError;
use crate::response::ApiResponse;

/// Posts endpoint operations.
///
/// # Implementations
///
/// - [`ResourceClient`]: the live REST API over HTTP
pub trait PostsApi: Send + Sync + 'static {
    fn create_post(
        &self,
        payload: &NewPost,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    fn get_post(
        &self,
        id: u64,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    fn list_posts(
        &self,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    fn update_post(
        &self,
        id: u64,
        patch: &PostPatch,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    fn delete_post(
        &self,
        id: u64,
        force: bool,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

impl PostsApi for ResourceClient {
    async fn create_post(&self, payload: &NewPost) -> Result<ApiResponse, ClientError> {
        ResourceClient::create_post(self, payload).await
    }

    async fn get_post(&self, id: u64, query: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        ResourceClient::get_post(self, id, query).await
    }

    async fn list_posts(&self, query: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        ResourceClient::list_posts(self, query).await
    }

    async fn update_post(&self, id: u64, patch: &PostPatch) -> Result<ApiResponse, ClientError> {
        ResourceClient::update_post(self, id, patch).await
    }

    async fn delete_post(&self, id: u64, force: bool) -> Result<ApiResponse, ClientError> {
        ResourceClient::delete_post(self, id, force).await
    }
}
