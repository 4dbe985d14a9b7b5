//! CSV format handling for point commands and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to point commands
//! - Balance and history report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    Amount, PointCommand, PointError, PointHistory, TransactionType, UserId, UserPoint,
};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, user, amount
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub user: UserId,
    pub amount: Amount,
}

/// Convert a CsvRecord to a PointCommand
///
/// The type is matched case-insensitively. Amounts are passed through as-is;
/// non-positive amounts are rejected by the engine, not here.
pub fn convert_csv_record(
    csv_record: CsvRecord,
    line: Option<u64>,
) -> Result<PointCommand, PointError> {
    let tx_type = match csv_record.tx_type.to_lowercase().as_str() {
        "charge" => TransactionType::Charge,
        "use" => TransactionType::Use,
        _ => {
            return Err(PointError::invalid_transaction_type(
                &csv_record.tx_type,
                line,
            ))
        }
    };

    Ok(PointCommand {
        tx_type,
        user: csv_record.user,
        amount: csv_record.amount,
    })
}

fn write_error(error: csv::Error) -> PointError {
    PointError::IoError {
        message: format!("Failed to write report: {}", error),
    }
}

/// Write balances with columns: user, point
///
/// Rows are sorted by user id for deterministic output.
pub fn write_balances_csv(
    points: &[UserPoint],
    output: &mut dyn Write,
) -> Result<(), PointError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["user", "point"]).map_err(write_error)?;

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.id);

    for point in sorted {
        writer
            .write_record(&[point.id.to_string(), point.point.to_string()])
            .map_err(write_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write history records with columns: user, type, amount
///
/// Rows are grouped by user id (ascending); each user's records keep their
/// insertion order.
pub fn write_history_csv(
    records: &[PointHistory],
    output: &mut dyn Write,
) -> Result<(), PointError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["user", "type", "amount"])
        .map_err(write_error)?;

    let mut sorted = records.to_vec();
    // Ids increase in append order, so they restore each user's insertion order.
    sorted.sort_by_key(|record| (record.user_id, record.id));

    for record in sorted {
        writer
            .write_record(&[
                record.user_id.to_string(),
                record.tx_type.as_str().to_string(),
                record.amount.to_string(),
            ])
            .map_err(write_error)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn csv_record(tx_type: &str, amount: Amount) -> CsvRecord {
        CsvRecord {
            tx_type: tx_type.to_string(),
            user: 1,
            amount,
        }
    }

    fn user_point(id: UserId, point: u64) -> UserPoint {
        UserPoint {
            id,
            point,
            updated_at: Utc::now(),
        }
    }

    fn history(id: u64, user_id: UserId, tx_type: TransactionType, amount: u64) -> PointHistory {
        PointHistory {
            id,
            user_id,
            amount,
            tx_type,
            timestamp: Utc::now(),
        }
    }

    #[rstest]
    #[case("charge", TransactionType::Charge)]
    #[case("use", TransactionType::Use)]
    #[case("CHARGE", TransactionType::Charge)] // case insensitive
    #[case("Use", TransactionType::Use)]
    fn test_convert_csv_record_valid(#[case] tx_type: &str, #[case] expected: TransactionType) {
        let command = convert_csv_record(csv_record(tx_type, 100), Some(2)).unwrap();

        assert_eq!(command.tx_type, expected);
        assert_eq!(command.user, 1);
        assert_eq!(command.amount, 100);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-10)]
    fn test_convert_csv_record_keeps_non_positive_amounts(#[case] amount: Amount) {
        let command = convert_csv_record(csv_record("charge", amount), None).unwrap();

        assert_eq!(command.amount, amount);
    }

    #[rstest]
    #[case::unknown("refund")]
    #[case::empty("")]
    fn test_convert_csv_record_invalid_type(#[case] tx_type: &str) {
        let result = convert_csv_record(csv_record(tx_type, 100), Some(5));

        assert_eq!(
            result,
            Err(PointError::invalid_transaction_type(tx_type, Some(5)))
        );
    }

    #[rstest]
    #[case::single(vec![user_point(1, 100)], "user,point\n1,100\n")]
    #[case::sorted_by_user(
        vec![user_point(3, 0), user_point(1, 10), user_point(2, 1_000_000)],
        "user,point\n1,10\n2,1000000\n3,0\n"
    )]
    #[case::empty(vec![], "user,point\n")]
    fn test_write_balances_csv(#[case] points: Vec<UserPoint>, #[case] expected: &str) {
        let mut output = Vec::new();

        write_balances_csv(&points, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_write_history_csv_groups_by_user_in_order() {
        let records = vec![
            history(4, 2, TransactionType::Charge, 50),
            history(1, 1, TransactionType::Charge, 100),
            history(5, 1, TransactionType::Use, 30),
            history(2, 2, TransactionType::Use, 5),
        ];
        let mut output = Vec::new();

        write_history_csv(&records, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "user,type,amount\n1,charge,100\n1,use,30\n2,use,5\n2,charge,50\n"
        );
    }
}
