//! Scoped teardown around one scenario.
//!
//! [`TestScope::run`] executes the scenario body on its own task, then runs
//! registry cleanup and closes the storage gateway exactly once, whether the
//! body passed, returned an error or panicked. Outcomes are reported in this
//! order of precedence:
//!
//! | body     | teardown | result                                      |
//! |----------|----------|---------------------------------------------|
//! | panicked | any      | original panic resumed, teardown error logged |
//! | `Err(e)` | any      | panic `scenario aborted: e`                 |
//! | `Ok(v)`  | failed   | panic `teardown failed: ...`                |
//! | `Ok(v)`  | ok       | `v`                                         |

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use postcheck_client::{PostsApi, ResourceClient};
use postcheck_core::config::HarnessConfig;
use postcheck_storage::{PostStore, StorageGateway};

use crate::cleanup::{CleanupRegistry, CleanupReport};
use crate::error::FixtureError;
use crate::factory::PostFactory;

/// Owns both channels and the cleanup registry for one scenario.
pub struct TestScope<A: PostsApi, S: PostStore> {
    store: Arc<S>,
    factory: PostFactory<A, S>,
}

impl TestScope<ResourceClient, StorageGateway> {
    /// Builds a scope against the live system. Nothing connects yet.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, FixtureError> {
        let api = ResourceClient::new(&config.api)?;
        let store = StorageGateway::new(&config.database);
        Ok(Self::new(api, store))
    }
}

impl<A: PostsApi, S: PostStore> TestScope<A, S> {
    pub fn new(api: A, store: S) -> Self {
        let store = Arc::new(store);
        let registry = Arc::new(CleanupRegistry::new(Arc::clone(&store)));
        let factory = PostFactory::new(Arc::new(api), registry);
        Self { store, factory }
    }

    pub fn factory(&self) -> &PostFactory<A, S> {
        &self.factory
    }

    /// Runs `body`, then tears down. See the module docs for outcomes.
    pub async fn run<F, Fut, T, E>(self, body: F) -> T
    where
        F: FnOnce(PostFactory<A, S>) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let outcome = tokio::spawn(body(self.factory.clone())).await;
        let teardown = self.teardown().await;

        match outcome {
            Err(join) if join.is_panic() => {
                if let Err(e) = &teardown {
                    error!(error = %e, "teardown failed after scenario panic");
                }
                std::panic::resume_unwind(join.into_panic())
            }
            Err(join) => {
                if let Err(e) = &teardown {
                    error!(error = %e, "teardown failed after scenario cancellation");
                }
                panic!("scenario task did not complete: {join}")
            }
            Ok(Err(e)) => {
                if let Err(t) = &teardown {
                    error!(error = %t, "teardown failed after scenario error");
                }
                panic!("scenario aborted: {e}")
            }
            Ok(Ok(value)) => match teardown {
                Ok(report) => {
                    info!(
                        deleted = report.deleted.len(),
                        already_absent = report.already_absent.len(),
                        "scenario passed"
                    );
                    value
                }
                Err(e) => panic!("teardown failed: {e}"),
            },
        }
    }

    /// Cleans up tracked posts, then closes the store even if cleanup failed.
    async fn teardown(&self) -> Result<CleanupReport, FixtureError> {
        let cleanup = self.factory.registry().cleanup().await;
        let close = self.store.close().await.map_err(FixtureError::from);

        match (cleanup, close) {
            (Ok(report), Ok(())) => Ok(report),
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Err(close_err)) => {
                error!(error = %close_err, "store close failed after cleanup error");
                Err(e)
            }
        }
    }
}
