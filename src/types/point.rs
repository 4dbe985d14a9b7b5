//! Balance and history types for the User Point Engine
//!
//! This module defines the per-user balance record, the immutable history
//! entry written for every successful mutation, and the transaction type
//! tagging the direction of each entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier
///
/// Any stable non-negative integer.
pub type UserId = u64;

/// Requested charge/use amount
///
/// Signed so the engine itself can reject non-positive requests.
pub type Amount = i64;

/// Default ceiling for a single user's balance
pub const MAX_POINT_LIMIT: u64 = 1_000_000;

/// Current point balance of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPoint {
    /// The user this balance belongs to
    pub id: UserId,

    /// Current balance, always within `0..=max_point`
    pub point: u64,

    /// Time of the last mutation
    ///
    /// For a user that has never been written this is the time of the read.
    pub updated_at: DateTime<Utc>,
}

impl UserPoint {
    /// Create a zero balance for a user with no stored record
    pub fn empty(id: UserId) -> Self {
        Self {
            id,
            point: 0,
            updated_at: Utc::now(),
        }
    }
}

/// Direction of a balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Points added to the balance
    Charge,

    /// Points spent from the balance
    Use,
}

impl TransactionType {
    /// Lowercase name used in CSV input and output
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Charge => "charge",
            TransactionType::Use => "use",
        }
    }
}

/// Immutable record of one successful charge or use
///
/// `amount` is always the transaction delta, never the resulting balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointHistory {
    /// Process-wide sequence number, increasing in append order
    pub id: u64,

    /// The user whose balance changed
    pub user_id: UserId,

    /// Magnitude of the change
    pub amount: u64,

    /// Charge or use
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Time the record was appended
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_user_point_has_zero_balance() {
        let point = UserPoint::empty(7);
        assert_eq!(point.id, 7);
        assert_eq!(point.point, 0);
    }

    #[test]
    fn test_transaction_type_serializes_uppercase() {
        let history = PointHistory {
            id: 1,
            user_id: 3,
            amount: 100,
            tx_type: TransactionType::Use,
            timestamp: Utc::now(),
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.serialize(history.tx_type).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out.trim(), "USE");
        assert_eq!(history.tx_type.as_str(), "use");
    }
}
