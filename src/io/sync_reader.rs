//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over point commands from a ledger file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PointCommand, PointError>` for each CSV row:
//!
//! ```no_run
//! use user_point_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Applying command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers (counting the header as line 1) are attached to row errors

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{PointCommand, PointError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time, so memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a ledger file for streaming iteration
    ///
    /// Whitespace around fields is trimmed.
    pub fn new(path: &Path) -> Result<Self, PointError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

/// Map a failed open to `FileNotFound` or a generic I/O error
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> PointError {
    if error.kind() == ErrorKind::NotFound {
        PointError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        PointError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl Iterator for SyncReader {
    type Item = Result<PointCommand, PointError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        Some(
            row.map_err(PointError::from)
                .and_then(|csv_record| convert_csv_record(csv_record, Some(self.line_num))),
        )
    }
}
