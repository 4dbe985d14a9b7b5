//! End-to-end integration tests
//!
//! These tests validate the complete ledger replay pipeline using predefined
//! CSV test fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Replays all rows through the point engine
//! 3. Generates the report CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Balance ceiling and insufficient balance rejections
//! - Invalid amounts and malformed rows
//! - Multiple users and the history report
//!
//! Each test is run twice: once with the sync strategy and once with the async strategy.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;
    use user_point_engine::cli::{ReportKind, StrategyType};
    use user_point_engine::core::EngineConfig;
    use user_point_engine::strategy::{create_strategy, BatchConfig};

    /// Run a test fixture by replaying input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, report: ReportKind, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        // Small batches so the async path exercises cross-batch ordering
        let strategy = create_strategy(
            strategy_type.clone(),
            EngineConfig::default(),
            Some(BatchConfig::new(2, 4)),
        );

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), report, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to replay ledger: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all balance fixtures with both strategies
    #[rstest]
    #[case("happy_path")]
    #[case("limit_exceeded")]
    #[case("insufficient_balance")]
    #[case("invalid_amounts")]
    #[case("malformed_data")]
    #[case("multiple_users")]
    #[case("whitespace_and_case")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, ReportKind::Balances, strategy);
    }

    #[rstest]
    fn test_history_report(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture("history_report", ReportKind::History, strategy);
    }

    #[rstest]
    fn test_missing_input_fails(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, EngineConfig::default(), None);
        let mut output = Vec::new();

        let result = strategy.process(
            Path::new("tests/fixtures/does_not_exist.csv"),
            ReportKind::Balances,
            &mut output,
        );

        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
