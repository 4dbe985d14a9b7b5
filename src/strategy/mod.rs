//! Processing strategy module for ledger replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! covering both CSV parsing and command application. Different processing
//! implementations (synchronous, asynchronous batch) are selected at runtime.

use crate::cli::{ReportKind, StrategyType};
use crate::core::{AccountStore, EngineConfig, HistoryLog, PointService};
use crate::io::{write_balances_csv, write_history_csv};
use crate::types::PointError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the ledger at `input_path` and write the requested report
    ///
    /// Rejected commands and malformed rows are logged and skipped; they do
    /// not cause this method to fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened or the report
    /// cannot be written.
    fn process(
        &self,
        input_path: &Path,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<(), PointError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `batch_config` is ignored by the sync strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    engine_config: EngineConfig,
    batch_config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(engine_config)),
        StrategyType::Async => {
            let config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(engine_config, config))
        }
    }
}

/// Write the final state of `service` as the requested report
pub(crate) fn write_report<S: AccountStore, H: HistoryLog>(
    service: &PointService<S, H>,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), PointError> {
    match report {
        ReportKind::Balances => write_balances_csv(&service.store().all(), output),
        ReportKind::History => write_history_csv(&service.history_log().all(), output),
    }
}
