//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `point`: Balance and history entities
//! - `command`: Point commands read from the input ledger
//! - `error`: Error types for the point engine

pub mod command;
pub mod error;
pub mod point;

pub use command::PointCommand;
pub use error::PointError;
pub use point::{Amount, PointHistory, TransactionType, UserId, UserPoint, MAX_POINT_LIMIT};
