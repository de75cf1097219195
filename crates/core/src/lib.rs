//! Shared building blocks for the postcheck harness.
//!
//! - [`config`]: environment-sourced [`HarnessConfig`]
//! - [`error`]: [`PostcheckError`] and [`ConfigError`]
//! - [`types`]: the post resource as seen through the API and through storage
//! - [`slug`]: title to slug derivation used by direct inserts
//! - [`token`]: uniqueness tokens and placeholder substitution

pub mod config;
pub mod error;
pub mod slug;
pub mod token;
pub mod types;

pub use config::{ApiConfig, DatabaseConfig, GeneralConfig, HarnessConfig};
pub use error::{ConfigError, PostcheckError};
pub use slug::slugify;
pub use token::{DEFAULT_PLACEHOLDER, UniquenessToken, apply_token, apply_token_with};
pub use types::{ApiErrorBody, DeletedPost, NewPost, Post, PostPatch, PostRow, PostStatus, RenderedText};
