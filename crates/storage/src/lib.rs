//! Storage channel of the postcheck harness.
//!
//! [`StorageGateway`] reads and writes the posts table directly over one lazily
//! opened MySQL connection. Read paths return generic [`RowMap`]s or typed
//! [`PostRow`](postcheck_core::types::PostRow)s; write paths commit immediately.
//! [`PostStore`] is the narrow trait fixtures depend on.

pub mod error;
pub mod gateway;
pub mod row;
pub mod store;

pub use error::GatewayError;
pub use gateway::{RawPost, StorageGateway};
pub use row::{RowMap, SqlParam, placeholders};
pub use store::PostStore;

pub use sqlx::Error as SqlxError;
