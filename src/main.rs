//! User Point Engine CLI
//!
//! Command-line interface for replaying a ledger of point charges and uses.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > balances.csv
//! cargo run -- --strategy sync ledger.csv > balances.csv
//! cargo run -- --report history ledger.csv > history.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv > balances.csv
//! cargo run -- --max-point 500000 --log-level debug ledger.csv > balances.csv
//! ```
//!
//! The program reads `type,user,amount` rows from the input CSV file, applies
//! them through the point engine using the selected processing strategy, and
//! writes the requested report to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (rejected rows are logged, not fatal)
//! - 1: Error (file not found, file not readable, output not writable)

use std::process;
use tracing::error;
use user_point_engine::cli;
use user_point_engine::logging;
use user_point_engine::strategy;

fn main() {
    let args = cli::parse_args();

    logging::init_logging(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_engine_config(), config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, args.report, &mut output) {
        error!(error = %e, "ledger replay failed");
        process::exit(1);
    }
}
