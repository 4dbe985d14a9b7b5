//! Core business logic module
//!
//! This module contains the balance-mutation components:
//! - `traits` - Storage seams the engine is generic over
//! - `account_store` - Current balance per user
//! - `history_log` - Append-only per-user transaction history
//! - `lock_manager` - Per-user critical sections
//! - `engine` - Charge/use validation and the mutation protocol
//! - `batch_processor` - Per-user partitioned replay on worker threads

pub mod account_store;
pub mod batch_processor;
pub mod engine;
pub mod history_log;
pub mod lock_manager;
pub mod traits;

pub use account_store::UserPointTable;
pub use batch_processor::BatchProcessor;
pub use engine::{EngineConfig, PointService};
pub use history_log::PointHistoryTable;
pub use lock_manager::UserLockManager;
pub use traits::{AccountStore, HistoryLog};
