//! Thread-safe balance storage
//!
//! This module provides `UserPointTable`, the in-memory account store. It keeps
//! the current `UserPoint` for every user that has ever been written.
//!
//! # Design
//!
//! `UserPointTable` uses `DashMap` (a sharded concurrent HashMap) so that reads
//! and writes for different users never contend on a global lock. The table
//! itself performs no check-then-act logic: `set` is an unconditional overwrite
//! and the engine holds the user's lock around every read-validate-write
//! sequence.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::traits::AccountStore;
use crate::types::{UserId, UserPoint};

/// In-memory balance table keyed by user id
#[derive(Debug, Default)]
pub struct UserPointTable {
    /// Stored balances
    ///
    /// Users appear here only after their first successful write.
    points: DashMap<UserId, UserPoint>,
}

impl UserPointTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
        }
    }

    /// Number of users with a stored balance
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl AccountStore for UserPointTable {
    fn get(&self, user_id: UserId) -> UserPoint {
        self.points
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| UserPoint::empty(user_id))
    }

    fn set(&self, user_id: UserId, point: u64, updated_at: DateTime<Utc>) -> UserPoint {
        let user_point = UserPoint {
            id: user_id,
            point,
            updated_at,
        };
        self.points.insert(user_id, user_point.clone());
        user_point
    }

    fn all(&self) -> Vec<UserPoint> {
        self.points
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
