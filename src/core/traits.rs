//! Core traits for balance storage and history logging
//!
//! The engine is generic over these seams so alternative stores can be
//! plugged in without touching the mutation protocol. Implementations must
//! be safe to share across threads; the engine serializes writers per user,
//! so a store only has to keep distinct users from corrupting each other.

use chrono::{DateTime, Utc};

use crate::types::{PointHistory, TransactionType, UserId, UserPoint};

/// Current balance per user
pub trait AccountStore: Send + Sync {
    /// Current balance, or a zero balance when the user has no record
    ///
    /// Must not create a stored entry.
    fn get(&self, user_id: UserId) -> UserPoint;

    /// Unconditionally overwrite a user's balance
    fn set(&self, user_id: UserId, point: u64, updated_at: DateTime<Utc>) -> UserPoint;

    /// Snapshot of every stored balance
    fn all(&self) -> Vec<UserPoint>;
}

/// Append-only per-user transaction history
pub trait HistoryLog: Send + Sync {
    /// Store a new record and return it
    fn append(
        &self,
        user_id: UserId,
        amount: u64,
        tx_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> PointHistory;

    /// All records for a user in insertion order
    fn list_by_user(&self, user_id: UserId) -> Vec<PointHistory>;

    /// Snapshot of every record, grouped per user in insertion order
    fn all(&self) -> Vec<PointHistory>;
}
