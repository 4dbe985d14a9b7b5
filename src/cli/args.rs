use crate::core::EngineConfig;
use crate::strategy::BatchConfig;
use crate::types::MAX_POINT_LIMIT;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a ledger of point charges and uses
#[derive(Parser, Debug)]
#[command(name = "point-engine")]
#[command(about = "Replay a ledger of user point charges and uses", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing point commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file (type,user,amount)")]
    pub input_file: PathBuf,

    /// Processing strategy to use for replaying the ledger
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for single-threaded or 'async' for batched"
    )]
    pub strategy: StrategyType,

    /// Report written to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "balances",
        help = "Report to print: 'balances' or 'history'"
    )]
    pub report: ReportKind,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of users processed concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of users processed concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Balance ceiling per user
    #[arg(
        long = "max-point",
        value_name = "POINTS",
        default_value_t = MAX_POINT_LIMIT,
        help = "Maximum balance a single user may hold"
    )]
    pub max_point: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Log filter, e.g. 'info' or 'user_point_engine=debug' (RUST_LOG takes precedence)"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available output reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Final balance per user
    Balances,
    /// Every applied charge and use
    History,
}

impl CliArgs {
    /// Build a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_point: self.max_point,
        }
    }
}
