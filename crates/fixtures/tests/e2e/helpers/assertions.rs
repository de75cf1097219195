//! Cross-channel assertion helpers.
//!
//! Every helper panics with both the expected and the actual value.

use postcheck_client::ApiResponse;
use postcheck_core::types::{ApiErrorBody, Post, PostRow};
use postcheck_storage::StorageGateway;
use serde::de::DeserializeOwned;

/// Asserts the response status and decodes the body.
///
/// # Panics
///
/// Panics on a status mismatch (showing the body) or an undecodable body.
#[allow(dead_code)]
pub fn expect_json<T: DeserializeOwned>(response: &ApiResponse, status: u16) -> T {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    response
        .json()
        .unwrap_or_else(|e| panic!("cannot decode {status} body: {e}\n{}", response.text()))
}

/// Asserts an error response and returns its decoded body.
#[allow(dead_code)]
pub fn expect_error(response: &ApiResponse, status: u16, code: &str) -> ApiErrorBody {
    let body: ApiErrorBody = expect_json(response, status);
    assert_eq!(body.code, code, "unexpected error code, body: {}", response.text());
    body
}

/// Asserts the posts table holds a row for `id` and returns it.
#[allow(dead_code)]
pub async fn expect_row(store: &StorageGateway, id: u64) -> PostRow {
    store
        .get_by_id(id)
        .await
        .unwrap_or_else(|e| panic!("storage read for post {id} failed: {e}"))
        .unwrap_or_else(|| panic!("post {id} has no row in {}", store.table()))
}

/// Asserts the posts table has no row for `id`.
#[allow(dead_code)]
pub async fn expect_no_row(store: &StorageGateway, id: u64) {
    let row = store
        .get_by_id(id)
        .await
        .unwrap_or_else(|e| panic!("storage read for post {id} failed: {e}"));
    assert!(row.is_none(), "post {id} should be absent, found {row:?}");
}

/// Asserts the row holds exactly these values.
#[allow(dead_code)]
pub fn assert_row_matches(row: &PostRow, title: &str, content: &str, status: &str) {
    assert_eq!(row.post_title, title, "post_title of row {}", row.id);
    assert_eq!(row.post_content, content, "post_content of row {}", row.id);
    assert_eq!(row.post_status, status, "post_status of row {}", row.id);
}

/// Asserts an edit-context API post holds exactly these values.
#[allow(dead_code)]
pub fn assert_post_matches(post: &Post, title: &str, content: &str, status: &str) {
    assert_eq!(post.title.raw.as_deref(), Some(title), "title.raw of post {}", post.id);
    assert_eq!(post.content.raw.as_deref(), Some(content), "content.raw of post {}", post.id);
    assert_eq!(post.status, status, "status of post {}", post.id);
}
