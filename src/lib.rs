//! User Point Engine Library
//! # Overview
//!
//! This library keeps a point balance per user and an append-only history of
//! every balance change. Charges and uses are validated against the balance
//! ceiling and the current balance while holding a per-user lock, so
//! concurrent requests for the same user never lose updates.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UserPoint, PointHistory, PointError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Charge/use validation and the mutation protocol
//!   - [`core::account_store`] - Current balance per user
//!   - [`core::history_log`] - Append-only per-user history
//!   - [`core::lock_manager`] - Per-user mutual exclusion
//! - [`io`] - Ledger parsing and report output
//! - [`strategy`] - Sync and async ledger replay pipelines
//! - [`logging`] - Tracing subscriber setup
//!
//! # Operations
//!
//! - **Charge**: Add points to a user, rejected if the balance would exceed the limit
//! - **Use**: Spend points, rejected if the balance is insufficient
//! - **Balance**: Current balance, zero for unknown users
//! - **History**: Every applied charge and use for a user, oldest first
//!
//! ```
//! use user_point_engine::core::{EngineConfig, PointService};
//!
//! let service = PointService::in_memory(EngineConfig::default());
//! service.charge(1, 10_000).unwrap();
//! service.use_points(1, 3_000).unwrap();
//!
//! assert_eq!(service.balance(1).point, 7_000);
//! assert_eq!(service.history(1).len(), 2);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{PointHistoryTable, PointService, UserLockManager, UserPointTable};
pub use io::{write_balances_csv, write_history_csv};
pub use types::{
    Amount, PointCommand, PointError, PointHistory, TransactionType, UserId, UserPoint,
    MAX_POINT_LIMIT,
};
