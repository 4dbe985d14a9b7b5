//! Synchronous processing strategy
//!
//! Replays a ledger on the calling thread, one row at a time, in file order.
//! Memory use is O(users + history), not O(file size).

use crate::cli::ReportKind;
use crate::core::{EngineConfig, PointService};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_report, ProcessingStrategy};
use crate::types::PointError;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use user_point_engine::cli::ReportKind;
/// use user_point_engine::core::EngineConfig;
/// use user_point_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(EngineConfig::default());
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("ledger.csv"), ReportKind::Balances, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    engine_config: EngineConfig,
}

impl SyncProcessingStrategy {
    pub fn new(engine_config: EngineConfig) -> Self {
        Self { engine_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<(), PointError> {
        let service = PointService::in_memory(self.engine_config);
        let reader = SyncReader::new(input_path)?;

        let mut applied = 0usize;
        let mut rejected = 0usize;
        for result in reader {
            match result.and_then(|command| service.apply(&command)) {
                Ok(_) => applied += 1,
                Err(e) => {
                    rejected += 1;
                    warn!(error = %e, "ledger row not applied");
                }
            }
        }

        info!(applied, rejected, "ledger replay finished");
        write_report(&service, report, output)
    }
}
