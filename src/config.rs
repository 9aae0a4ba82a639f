// Configuration management for the trading bot and the mock exchange

use crate::exchange::OracleConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_secs: u64,
    pub recv_window_ms: i64, // Max age of a signed request's timestamp
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            api_key: "mock_key".to_string(),
            api_secret: "mock_secret".to_string(),
            timeout_secs: 5,
            recv_window_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub verify_signatures: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            verify_signatures: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// JSON order API in front of the exchange client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl WebConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub default_price: Decimal,
    pub jitter_bps: u32,
    pub base_prices: BTreeMap<String, Decimal>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        let oracle = OracleConfig::default();
        Self {
            default_price: oracle.default_price,
            jitter_bps: oracle.jitter_bps,
            base_prices: oracle.base_prices.into_iter().collect(),
        }
    }
}

impl MarketConfig {
    pub fn oracle_config(&self) -> OracleConfig {
        OracleConfig {
            base_prices: self
                .base_prices
                .iter()
                .map(|(symbol, price)| (symbol.clone(), *price))
                .collect(),
            default_price: self.default_price,
            jitter_bps: self.jitter_bps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub log_to_file: bool,
    pub log_directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: true,
            log_directory: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exchange: ExchangeConfig,
    pub server: ServerConfig,
    pub web: WebConfig,
    pub market: MarketConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            info!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Load configuration from file, falling back to defaults when it is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("exchange.base_url must not be empty".to_string()));
        }

        if self.exchange.timeout_secs == 0 {
            return Err(ConfigError::Validation("exchange.timeout_secs must be greater than 0".to_string()));
        }

        if self.exchange.recv_window_ms <= 0 {
            return Err(ConfigError::Validation("exchange.recv_window_ms must be positive".to_string()));
        }

        if self.market.default_price <= Decimal::ZERO {
            return Err(ConfigError::Validation("market.default_price must be positive".to_string()));
        }

        if self.market.jitter_bps >= 10_000 {
            return Err(ConfigError::Validation("market.jitter_bps must be below 10000".to_string()));
        }

        if let Some((symbol, _)) = self.market.base_prices.iter().find(|(_, p)| **p <= Decimal::ZERO) {
            return Err(ConfigError::Validation(format!("market.base_prices.{} must be positive", symbol)));
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!("logging.level '{}' is not a log level", self.logging.level)));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
