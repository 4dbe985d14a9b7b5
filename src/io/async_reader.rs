//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reads of point commands for the async processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures' `AsyncRead` so any tokio source can be adapted via `tokio-util` compat
//! - Batch reading so each batch can be partitioned by user
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PointCommands
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{PointCommand, PointError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read up to `batch_size` commands
    ///
    /// Malformed rows are logged and skipped. Returns an empty vector at end
    /// of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PointCommand> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let Some(row) = records.next().await else {
                break;
            };
            self.line_num += 1;

            match row {
                Ok(csv_record) => match convert_csv_record(csv_record, Some(self.line_num)) {
                    Ok(command) => batch.push(command),
                    Err(e) => warn!(error = %e, "skipping ledger row"),
                },
                Err(e) => {
                    let error = parse_error(e, self.line_num);
                    warn!(error = %error, "skipping ledger row");
                }
            }
        }

        batch
    }
}

fn parse_error(error: csv_async::Error, line: u64) -> PointError {
    PointError::ParseError {
        line: Some(line),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "type,user,amount\ncharge,1,100\nuse,1,50\ncharge,2,200\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(2).await;
        assert_eq!(
            batch,
            vec![PointCommand::charge(1, 100), PointCommand::use_points(1, 50)]
        );

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch, vec![PointCommand::charge(2, 200)]);

        let batch = async_reader.read_batch(2).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = AsyncReader::new(Cursor::new("type,user,amount\n".as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows() {
        let csv_content = "type,user,amount\nrefund,1,100\ncharge,1,abc\nuse,1,50\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch, vec![PointCommand::use_points(1, 50)]);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_and_case() {
        let csv_content = "type,user,amount\n  CHARGE  ,  3  ,  10  \nUse,3,4\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(
            batch,
            vec![PointCommand::charge(3, 10), PointCommand::use_points(3, 4)]
        );
    }
}
