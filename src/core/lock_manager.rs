//! Per-user mutual exclusion
//!
//! `UserLockManager` hands out one exclusive critical section per user id.
//! Holding the lock for one user never blocks work for another user.
//!
//! # Design
//!
//! The registry is a `DashMap<UserId, Arc<Mutex<()>>>`. A caller clones the
//! user's `Arc` while the map shard is locked, releases the shard, then blocks
//! on the mutex. After the critical section the caller drops its clone and
//! removes the entry if the map holds the only remaining reference. Cloning
//! and the strong-count check both run under the shard lock, so an entry is
//! never removed while another caller holds or waits on it, and the registry
//! only contains users with in-flight mutations.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

use crate::types::UserId;

/// Registry of lazily created per-user locks
#[derive(Debug, Default)]
pub struct UserLockManager {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLockManager {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Run `f` while holding the exclusive lock for `user_id`
    ///
    /// Blocks the calling thread until the current holder releases. Callers
    /// must not acquire another user's lock inside `f`.
    pub fn with_lock<R, F>(&self, user_id: UserId, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let lock = Arc::clone(
            self.locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );

        let result = {
            // The mutex guards no data, so a poisoned lock carries no broken state.
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        drop(lock);
        self.locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    /// Number of live lock entries
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
