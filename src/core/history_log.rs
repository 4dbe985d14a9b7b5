//! Thread-safe append-only transaction history
//!
//! This module provides `PointHistoryTable`, which stores one `PointHistory`
//! record per successful charge or use.
//!
//! # Design
//!
//! Records are kept in a `DashMap` of per-user vectors, so appends and reads
//! for different users proceed in parallel while each user's vector preserves
//! insertion order. Record ids come from a process-wide atomic cursor and are
//! therefore unique and increasing in append order.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::traits::HistoryLog;
use crate::types::{PointHistory, TransactionType, UserId};

/// In-memory history table keyed by user id
#[derive(Debug)]
pub struct PointHistoryTable {
    /// Per-user records in insertion order
    histories: DashMap<UserId, Vec<PointHistory>>,

    /// Id assigned to the next appended record
    cursor: AtomicU64,
}

impl PointHistoryTable {
    /// Create an empty history table
    pub fn new() -> Self {
        Self {
            histories: DashMap::new(),
            cursor: AtomicU64::new(1),
        }
    }

    /// Total number of records across all users
    pub fn len(&self) -> usize {
        self.histories.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PointHistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog for PointHistoryTable {
    fn append(
        &self,
        user_id: UserId,
        amount: u64,
        tx_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> PointHistory {
        let record = PointHistory {
            id: self.cursor.fetch_add(1, Ordering::Relaxed),
            user_id,
            amount,
            tx_type,
            timestamp,
        };

        self.histories
            .entry(user_id)
            .or_default()
            .push(record.clone());

        record
    }

    fn list_by_user(&self, user_id: UserId) -> Vec<PointHistory> {
        self.histories
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn all(&self) -> Vec<PointHistory> {
        self.histories
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }
}
