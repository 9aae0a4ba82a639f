// Trading Bot Library
//
// Order-placement client for a futures-style REST protocol, bundled with a
// mock exchange that simulates execution in memory.

pub mod client;
pub mod config;
pub mod error; // Unified error handling
pub mod exchange;
pub mod logging;
pub mod orders;
pub mod retry; // Backoff for idempotent exchange calls
pub mod server;
pub mod signing; // HMAC-SHA256 request signing
pub mod types;
pub mod validation; // CLI input validation
pub mod web; // JSON order API with local history

// Re-export error types
pub use error::{TradingError, TradingResult};

// Re-export configuration
pub use config::{
    Config, ConfigError, ExchangeConfig, LoggingConfig, MarketConfig, ServerConfig, WebConfig,
};

// Re-export order types
pub use types::{NewOrderRequest, Order, OrderId, OrderStatus, OrderType, Side, TimeInForce};

// Re-export exchange engine
pub use exchange::{
    ExecutionSimulator, FixedPriceOracle, JitterPriceOracle, OracleConfig, OrderError, PriceOracle,
};

// Re-export client and server
pub use client::{ClientError, ExchangeClient};
pub use server::MockExchange;
