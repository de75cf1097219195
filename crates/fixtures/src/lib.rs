//! Test-data lifecycle for postcheck scenarios.
//!
//! - [`PostFactory`]: uniquely named posts via the API or via direct insert
//! - [`CleanupRegistry`]: per-test tracking and deferred, idempotent removal
//! - [`TestScope`]: runs a scenario body and guarantees teardown
//! - [`logging`]: tracing subscriber setup
//!
//! ```ignore
//! let config = HarnessConfig::from_env()?;
//! TestScope::from_config(&config)?
//!     .run(|factory| async move {
//!         let post = factory.create_via_api(&ApiPostSpec::default()).await?;
//!         let row = factory.store().get_by_id(post.id).await?;
//!         assert!(row.is_some());
//!         Ok::<_, FixtureError>(())
//!     })
//!     .await;
//! ```

pub mod cleanup;
pub mod error;
pub mod factory;
pub mod logging;
pub mod scope;

#[cfg(test)]
mod testing;

pub use cleanup::{CleanupRegistry, CleanupReport};
pub use error::FixtureError;
pub use factory::{ApiPostSpec, PostFactory, SeedSpec, SeededPost};
pub use logging::init_tracing;
pub use scope::TestScope;
