//! Error types for the User Point Engine
//!
//! This module defines all error types that can occur while applying point
//! commands or replaying a ledger file.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Invalid amount, limit exceeded, insufficient balance.
//!   These are expected, user-correctable and never mutate state.
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed rows, unknown command types.

use super::point::{Amount, UserId};
use thiserror::Error;

/// Main error type for the point engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    /// Charge or use amount was zero or negative
    ///
    /// Recoverable - no state is mutated.
    #[error("Invalid amount {amount} for user {user}: amount must be greater than zero")]
    InvalidAmount {
        /// User the request targeted
        user: UserId,
        /// The rejected amount
        amount: Amount,
    },

    /// A charge would push the balance above the ceiling
    ///
    /// Recoverable - no state is mutated.
    #[error("Point limit exceeded for user {user}: balance {current}, charge {requested}, limit {limit}")]
    LimitExceeded {
        /// User the request targeted
        user: UserId,
        /// Balance before the charge
        current: u64,
        /// Requested charge
        requested: u64,
        /// Configured ceiling
        limit: u64,
    },

    /// A use would drive the balance negative
    ///
    /// Recoverable - no state is mutated.
    #[error("Insufficient balance for user {user}: available {available}, requested {requested}")]
    InsufficientBalance {
        /// User the request targeted
        user: UserId,
        /// Balance before the use
        available: u64,
        /// Requested use
        requested: u64,
    },

    /// File not found at the specified path
    ///
    /// Fatal for ledger replay.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable - the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown command type in the ledger
    ///
    /// Recoverable - the row is skipped.
    #[error("Invalid transaction type '{tx_type}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidTransactionType {
        /// The unrecognised type string
        tx_type: String,
        /// Line number (if available)
        line: Option<u64>,
    },
}

impl From<std::io::Error> for PointError {
    fn from(error: std::io::Error) -> Self {
        PointError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for PointError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PointError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl PointError {
    pub fn invalid_amount(user: UserId, amount: Amount) -> Self {
        PointError::InvalidAmount { user, amount }
    }

    pub fn limit_exceeded(user: UserId, current: u64, requested: u64, limit: u64) -> Self {
        PointError::LimitExceeded {
            user,
            current,
            requested,
            limit,
        }
    }

    pub fn insufficient_balance(user: UserId, available: u64, requested: u64) -> Self {
        PointError::InsufficientBalance {
            user,
            available,
            requested,
        }
    }

    pub fn invalid_transaction_type(tx_type: &str, line: Option<u64>) -> Self {
        PointError::InvalidTransactionType {
            tx_type: tx_type.to_string(),
            line,
        }
    }

    /// Whether this error is a rejected command rather than an I/O or parse failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PointError::InvalidAmount { .. }
                | PointError::LimitExceeded { .. }
                | PointError::InsufficientBalance { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_amount(
        PointError::InvalidAmount { user: 1, amount: 0 },
        "Invalid amount 0 for user 1: amount must be greater than zero"
    )]
    #[case::limit_exceeded(
        PointError::LimitExceeded { user: 1, current: 990_000, requested: 10_001, limit: 1_000_000 },
        "Point limit exceeded for user 1: balance 990000, charge 10001, limit 1000000"
    )]
    #[case::insufficient_balance(
        PointError::InsufficientBalance { user: 2, available: 20_000, requested: 50_000 },
        "Insufficient balance for user 2: available 20000, requested 50000"
    )]
    #[case::file_not_found(
        PointError::FileNotFound { path: "ledger.csv".to_string() },
        "File not found: ledger.csv"
    )]
    #[case::parse_error_with_line(
        PointError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        PointError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_transaction_type(
        PointError::InvalidTransactionType { tx_type: "refund".to_string(), line: Some(3) },
        "Invalid transaction type 'refund' at line 3"
    )]
    fn test_error_display(#[case] error: PointError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_amount(PointError::invalid_amount(1, -5), true)]
    #[case::limit_exceeded(PointError::limit_exceeded(1, 1, 2, 3), true)]
    #[case::insufficient_balance(PointError::insufficient_balance(1, 0, 1), true)]
    #[case::io(PointError::IoError { message: "disk".to_string() }, false)]
    #[case::bad_type(PointError::invalid_transaction_type("x", None), false)]
    fn test_is_validation(#[case] error: PointError, #[case] expected: bool) {
        assert_eq!(error.is_validation(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: PointError = io_error.into();
        assert!(matches!(error, PointError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
