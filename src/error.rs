//! Unified error handling for the trading bot
//!
//! Module-local errors (`OrderError`, `ClientError`, `ConfigError`) convert
//! into `TradingError`, which carries the user-facing message, the retry
//! policy hint and the CLI exit code.

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::exchange::OrderError;
use std::fmt;
use std::io;

/// Main error type for the trading bot
#[derive(Debug)]
pub enum TradingError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // Order input rejected before or by the exchange engine
    Order(OrderError),
    InvalidParameter(String, String), // (parameter_name, reason)

    // API errors
    ApiRejected { code: i32, msg: String },
    ApiConnection(String),
    ApiTimeout(String),
    ApiResponse(String),

    // Server errors
    ServerStartup(String),

    // IO errors
    FileNotFound(String),
    FileRead(String),
    FileWrite(String),
    DirectoryCreate(String),

    // General errors
    Internal(String),
}

impl TradingError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            TradingError::ConfigNotFound(path) => {
                format!(
                    "Configuration file not found: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: trading-bot init\n\
                    2. Edit config.toml if needed\n\
                    3. Try again",
                    path
                )
            }
            TradingError::ApiConnection(msg) => {
                format!(
                    "Cannot connect to the exchange: {}\n\n\
                    💡 Check:\n\
                    - Is the mock exchange running? (trading-bot serve)\n\
                    - Does exchange.base_url in config.toml point at it?",
                    msg
                )
            }
            TradingError::ApiRejected { code, msg } => {
                format!("Error {}: {}", code, msg)
            }
            TradingError::Order(err) => {
                format!("Error {}: {}", err.code(), err)
            }
            TradingError::ServerStartup(msg) => {
                format!(
                    "Mock exchange failed to start: {}\n\n\
                    💡 Another process may already be listening on the configured port.\n\
                    Use --remote to talk to it, or change server.port",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TradingError::ApiTimeout(_) | TradingError::ApiConnection(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TradingError::ConfigNotFound(_)
            | TradingError::ConfigParse(_)
            | TradingError::ConfigValidation(_) => "config",

            TradingError::Order(_) | TradingError::InvalidParameter(_, _) => "validation",

            TradingError::ApiRejected { .. } => "exchange",

            TradingError::ApiConnection(_)
            | TradingError::ApiTimeout(_)
            | TradingError::ApiResponse(_) => "api",

            TradingError::ServerStartup(_) => "server",

            TradingError::FileNotFound(_)
            | TradingError::FileRead(_)
            | TradingError::FileWrite(_)
            | TradingError::DirectoryCreate(_) => "io",

            TradingError::Internal(_) => "internal",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            "validation" => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for TradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            TradingError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            TradingError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }

            TradingError::Order(err) => {
                write!(f, "Order rejected: {}", err)
            }
            TradingError::InvalidParameter(param, reason) => {
                write!(f, "Invalid parameter '{}': {}", param, reason)
            }

            TradingError::ApiRejected { code, msg } => {
                write!(f, "API error {}: {}", code, msg)
            }
            TradingError::ApiConnection(msg) => {
                write!(f, "API connection error: {}", msg)
            }
            TradingError::ApiTimeout(msg) => {
                write!(f, "API timeout: {}", msg)
            }
            TradingError::ApiResponse(msg) => {
                write!(f, "API response error: {}", msg)
            }

            TradingError::ServerStartup(msg) => {
                write!(f, "Server startup error: {}", msg)
            }

            TradingError::FileNotFound(path) => {
                write!(f, "File not found: {}", path)
            }
            TradingError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            TradingError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }
            TradingError::DirectoryCreate(msg) => {
                write!(f, "Directory creation error: {}", msg)
            }

            TradingError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TradingError {}

// Conversion implementations for common error types

impl From<io::Error> for TradingError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => TradingError::FileNotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => TradingError::FileRead(err.to_string()),
            io::ErrorKind::AddrInUse | io::ErrorKind::AddrNotAvailable => {
                TradingError::ServerStartup(err.to_string())
            }
            io::ErrorKind::TimedOut => TradingError::ApiTimeout(err.to_string()),
            io::ErrorKind::ConnectionRefused => TradingError::ApiConnection(err.to_string()),
            _ => TradingError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for TradingError {
    fn from(err: serde_json::Error) -> Self {
        TradingError::ApiResponse(format!("JSON parse error: {}", err))
    }
}

impl From<toml::de::Error> for TradingError {
    fn from(err: toml::de::Error) -> Self {
        TradingError::ConfigParse(format!("TOML parse error: {}", err))
    }
}

impl From<reqwest::Error> for TradingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TradingError::ApiTimeout(err.to_string())
        } else if err.is_connect() {
            TradingError::ApiConnection(err.to_string())
        } else if err.is_status() || err.is_decode() {
            TradingError::ApiResponse(err.to_string())
        } else {
            TradingError::ApiConnection(err.to_string())
        }
    }
}

impl From<ConfigError> for TradingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileRead(msg) => TradingError::FileRead(msg),
            ConfigError::FileWrite(msg) => TradingError::FileWrite(msg),
            ConfigError::Parse(msg) => TradingError::ConfigParse(msg),
            ConfigError::Serialize(msg) => TradingError::Internal(msg),
            ConfigError::Validation(msg) => TradingError::ConfigValidation(msg),
        }
    }
}

impl From<ClientError> for TradingError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { code, msg } => TradingError::ApiRejected { code, msg },
            ClientError::Transport(msg) => TradingError::ApiConnection(msg),
            ClientError::Timeout(msg) => TradingError::ApiTimeout(msg),
            ClientError::Decode(msg) => TradingError::ApiResponse(msg),
        }
    }
}

impl From<OrderError> for TradingError {
    fn from(err: OrderError) -> Self {
        TradingError::Order(err)
    }
}

/// Result type alias using TradingError
pub type TradingResult<T> = Result<T, TradingError>;
