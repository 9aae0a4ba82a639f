// Mock exchange core
// Price oracle plus the execution simulator that owns the order registry

pub mod error;
pub mod execution_simulator;
pub mod price_oracle;

pub use error::OrderError;
pub use execution_simulator::{ExecutionSimulator, INITIAL_ORDER_COUNTER};
pub use price_oracle::{FixedPriceOracle, JitterPriceOracle, OracleConfig, PriceOracle};
