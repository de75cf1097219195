//! Resource client for the posts REST API.
//!
//! [`ResourceClient`] issues authenticated calls with a uniform timeout and
//! hands back [`ApiResponse`] values; [`PostsApi`] is the trait fixtures are
//! generic over.

pub mod api;
pub mod client;
pub mod error;
pub mod response;

pub use api::PostsApi;
pub use client::{POSTS_ROUTE, ResourceClient};
pub use error::ClientError;
pub use response::ApiResponse;

pub use reqwest::StatusCode;
