//! Point commands replayed from the input ledger

use super::point::{Amount, TransactionType, UserId};

/// A single charge or use request as read from the input CSV
///
/// The amount is kept signed so that non-positive requests reach the
/// engine and are rejected there with `InvalidAmount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCommand {
    /// Whether the command charges or uses points
    pub tx_type: TransactionType,

    /// The user the command applies to
    pub user: UserId,

    /// Requested amount
    pub amount: Amount,
}

impl PointCommand {
    pub fn charge(user: UserId, amount: Amount) -> Self {
        Self {
            tx_type: TransactionType::Charge,
            user,
            amount,
        }
    }

    pub fn use_points(user: UserId, amount: Amount) -> Self {
        Self {
            tx_type: TransactionType::Use,
            user,
            amount,
        }
    }
}
