//! Per-test registry of created posts and their deferred removal.
//!
//! ```text
//!   Idle ──register──► Registered(ids) ──cleanup──► Cleaned
//!                        ▲        │
//!                        └register┘
//! ```
//!
//! Cleanup walks the ids in registration order, checks each for existence
//! and deletes only what is still there, so a post removed by the test body
//! (or by anyone else) is skipped rather than reported. The first failure
//! stops the walk.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use postcheck_storage::PostStore;

use crate::error::FixtureError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum RegistryState {
    Idle,
    Registered(Vec<u64>),
    Cleaned,
}

/// Outcome of a successful cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Ids that were present and got deleted
    pub deleted: Vec<u64>,
    /// Ids that were already gone
    pub already_absent: Vec<u64>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.deleted.len() + self.already_absent.len()
    }
}

/// Tracks post ids created during one test and removes them afterwards.
pub struct CleanupRegistry<S: PostStore> {
    store: Arc<S>,
    state: Mutex<RegistryState>,
}

impl<S: PostStore> CleanupRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: Mutex::new(RegistryState::Idle),
        }
    }

    /// Store the registry deletes from.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tracks `post_id` for deletion. Registering an id twice tracks it once.
    pub fn register(&self, post_id: u64) -> Result<(), FixtureError> {
        let mut state = self.lock();
        match &mut *state {
            RegistryState::Cleaned => return Err(FixtureError::RegistryClosed { post_id }),
            RegistryState::Registered(ids) => {
                if !ids.contains(&post_id) {
                    ids.push(post_id);
                    debug!(post_id, tracked = ids.len(), "post registered for cleanup");
                }
                return Ok(());
            }
            RegistryState::Idle => {}
        }

        *state = RegistryState::Registered(vec![post_id]);
        debug!(post_id, tracked = 1, "post registered for cleanup");
        Ok(())
    }

    /// Fails with `ScopeClosed` once cleanup has run.
    pub fn ensure_open(&self) -> Result<(), FixtureError> {
        if self.is_cleaned() {
            return Err(FixtureError::ScopeClosed);
        }
        Ok(())
    }

    /// Tracked ids in registration order.
    pub fn tracked(&self) -> Vec<u64> {
        match &*self.lock() {
            RegistryState::Registered(ids) => ids.clone(),
            RegistryState::Idle | RegistryState::Cleaned => Vec::new(),
        }
    }

    pub fn is_cleaned(&self) -> bool {
        *self.lock() == RegistryState::Cleaned
    }

    /// Deletes every tracked post that still exists. Runs at most once.
    pub async fn cleanup(&self) -> Result<CleanupReport, FixtureError> {
        let ids = {
            let mut state = self.lock();
            match std::mem::replace(&mut *state, RegistryState::Cleaned) {
                RegistryState::Cleaned => return Err(FixtureError::AlreadyCleaned),
                RegistryState::Idle => Vec::new(),
                RegistryState::Registered(ids) => ids,
            }
        };

        let mut report = CleanupReport::default();
        for post_id in ids {
            let present = self
                .store
                .exists(post_id)
                .await
                .map_err(|e| teardown_error(post_id, e))?;

            if !present {
                debug!(post_id, "post already absent, skipping");
                report.already_absent.push(post_id);
                continue;
            }

            self.store
                .delete(post_id)
                .await
                .map_err(|e| teardown_error(post_id, e))?;
            report.deleted.push(post_id);
        }

        info!(
            deleted = report.deleted.len(),
            already_absent = report.already_absent.len(),
            "cleanup finished"
        );
        Ok(report)
    }
}

fn teardown_error(post_id: u64, err: impl std::fmt::Display) -> FixtureError {
    warn!(post_id, error = %err, "cleanup step failed");
    FixtureError::Teardown {
        post_id,
        reason: err.to_string(),
    }
}
