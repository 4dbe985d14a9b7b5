//! Balance mutation engine
//!
//! This module provides `PointService`, which validates and applies charge and
//! use commands against an `AccountStore` and a `HistoryLog`.
//!
//! # Architecture
//!
//! ```text
//! PointService
//!     ├── Arc<S: AccountStore>   (current balances)
//!     ├── Arc<H: HistoryLog>     (append-only history)
//!     └── Arc<UserLockManager>   (per-user critical sections)
//! ```
//!
//! # Mutation Protocol
//!
//! Every mutation runs the same sequence while holding the user's lock:
//! read the balance, validate, write the new balance, append one history
//! record. Validation fully precedes any write, so a rejected command leaves
//! both the balance and the history untouched. Reads (`balance`, `history`)
//! do not take the lock and may observe a mutation in flight.
//!
//! # Thread Safety
//!
//! The service is cheap to clone and every clone shares the same state.
//! Commands for different users run in parallel; commands for the same user
//! are applied in some serial order.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::account_store::UserPointTable;
use super::history_log::PointHistoryTable;
use super::lock_manager::UserLockManager;
use super::traits::{AccountStore, HistoryLog};
use crate::types::{
    Amount, PointCommand, PointError, PointHistory, TransactionType, UserId, UserPoint,
    MAX_POINT_LIMIT,
};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ceiling for any single user's balance
    pub max_point: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_point: MAX_POINT_LIMIT,
        }
    }
}

/// Point balance service
#[derive(Debug)]
pub struct PointService<S = UserPointTable, H = PointHistoryTable> {
    store: Arc<S>,
    history: Arc<H>,
    locks: Arc<UserLockManager>,
    config: EngineConfig,
}

impl<S, H> Clone for PointService<S, H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            history: Arc::clone(&self.history),
            locks: Arc::clone(&self.locks),
            config: self.config,
        }
    }
}

impl PointService {
    /// Create a service backed by fresh in-memory tables
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            Arc::new(UserPointTable::new()),
            Arc::new(PointHistoryTable::new()),
            config,
        )
    }
}

impl<S: AccountStore, H: HistoryLog> PointService<S, H> {
    pub fn new(store: Arc<S>, history: Arc<H>, config: EngineConfig) -> Self {
        Self {
            store,
            history,
            locks: Arc::new(UserLockManager::new()),
            config,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn history_log(&self) -> &Arc<H> {
        &self.history
    }

    /// Number of users with a mutation currently in flight
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }

    /// Current balance of a user
    pub fn balance(&self, user_id: UserId) -> UserPoint {
        debug!(user_id, "balance lookup");
        self.store.get(user_id)
    }

    /// Transaction history of a user in insertion order
    pub fn history(&self, user_id: UserId) -> Vec<PointHistory> {
        debug!(user_id, "history lookup");
        self.history.list_by_user(user_id)
    }

    /// Add points to a user's balance
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount <= 0`
    /// * `LimitExceeded` - the resulting balance would exceed `max_point`
    pub fn charge(&self, user_id: UserId, amount: Amount) -> Result<UserPoint, PointError> {
        let amount = validate_amount(user_id, amount)?;
        let limit = self.config.max_point;

        self.locks.with_lock(user_id, || {
            let current = self.store.get(user_id);

            let new_point = current
                .point
                .checked_add(amount)
                .filter(|point| *point <= limit)
                .ok_or_else(|| {
                    warn!(user_id, current = current.point, amount, limit, "charge rejected");
                    PointError::limit_exceeded(user_id, current.point, amount, limit)
                })?;

            let now = Utc::now();
            let updated = self.store.set(user_id, new_point, now);
            self.history
                .append(user_id, amount, TransactionType::Charge, now);

            info!(user_id, amount, point = new_point, "points charged");
            Ok(updated)
        })
    }

    /// Spend points from a user's balance
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount <= 0`
    /// * `InsufficientBalance` - the balance is smaller than `amount`
    pub fn use_points(&self, user_id: UserId, amount: Amount) -> Result<UserPoint, PointError> {
        let amount = validate_amount(user_id, amount)?;

        self.locks.with_lock(user_id, || {
            let current = self.store.get(user_id);

            let new_point = current.point.checked_sub(amount).ok_or_else(|| {
                warn!(user_id, available = current.point, amount, "use rejected");
                PointError::insufficient_balance(user_id, current.point, amount)
            })?;

            let now = Utc::now();
            let updated = self.store.set(user_id, new_point, now);
            self.history.append(user_id, amount, TransactionType::Use, now);

            info!(user_id, amount, point = new_point, "points used");
            Ok(updated)
        })
    }

    /// Apply a ledger command
    pub fn apply(&self, command: &PointCommand) -> Result<UserPoint, PointError> {
        match command.tx_type {
            TransactionType::Charge => self.charge(command.user, command.amount),
            TransactionType::Use => self.use_points(command.user, command.amount),
        }
    }
}

fn validate_amount(user_id: UserId, amount: Amount) -> Result<u64, PointError> {
    u64::try_from(amount)
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| {
            warn!(user_id, amount, "non-positive amount rejected");
            PointError::invalid_amount(user_id, amount)
        })
}
