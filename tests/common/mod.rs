// Common test utilities and helpers
#![allow(dead_code)]

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use std::path::PathBuf;
use trading_bot::{Config, ExecutionSimulator, FixedPriceOracle, MockExchange};

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

/// Simulator whose oracle always quotes `price`
pub fn fixed_simulator(price: &str) -> ExecutionSimulator {
    ExecutionSimulator::new(Arc::new(FixedPriceOracle(dec(price))))
}

/// Configuration with logging kept off disk and an ephemeral server port
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.port = 0;
    config.logging.log_to_file = false;
    config
}

/// Mock exchange quoting 97000.0 for everything, optionally checking signatures
pub fn fixed_exchange(verify_signatures: bool) -> MockExchange {
    let mut config = create_test_config();
    config.server.verify_signatures = verify_signatures;

    let simulator = Arc::new(fixed_simulator("97000.0"));
    MockExchange::new(simulator, trading_bot::server::Authenticator::from_config(&config))
}

/// Temporary directory holding a config file path
pub fn create_temp_config_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.toml");
    (temp_dir, path)
}
