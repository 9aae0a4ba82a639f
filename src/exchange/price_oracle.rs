// Price Oracle
// Produces the simulated execution price used when a market order fills

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Source of execution prices.
///
/// The execution simulator asks for exactly one quote per filled order.
pub trait PriceOracle: Send + Sync {
    fn quote(&self, symbol: &str) -> Decimal;
}

/// Base prices and jitter band for the [`JitterPriceOracle`]
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub base_prices: HashMap<String, Decimal>,
    /// Price used for symbols missing from `base_prices`
    pub default_price: Decimal,
    /// Half-width of the uniform jitter band in basis points
    pub jitter_bps: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        let base_prices = [
            ("BTCUSDT", Decimal::new(970000, 1)),
            ("ETHUSDT", Decimal::new(32000, 1)),
            ("SOLUSDT", Decimal::new(1800, 1)),
        ]
        .into_iter()
        .map(|(symbol, price)| (symbol.to_string(), price))
        .collect();

        Self {
            base_prices,
            default_price: Decimal::new(1000, 1),
            jitter_bps: 10, // ±0.1%
        }
    }
}

/// Quotes `round(base * U, 2)` with `U` uniform in `[1 - jitter, 1 + jitter]`.
///
/// The multiplier is drawn in millionths so the whole computation stays in
/// decimal arithmetic.
pub struct JitterPriceOracle {
    config: OracleConfig,
    rng: Mutex<StdRng>,
}

impl JitterPriceOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible quote sequence for tests and replays
    pub fn with_seed(config: OracleConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn base_price(&self, symbol: &str) -> Decimal {
        self.config
            .base_prices
            .get(symbol)
            .copied()
            .unwrap_or(self.config.default_price)
    }

    fn draw_multiplier(&self) -> Decimal {
        let spread = i64::from(self.config.jitter_bps) * 100;
        let offset = if spread == 0 {
            0
        } else {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.gen_range(-spread..=spread)
        };
        Decimal::new(1_000_000 + offset, 6)
    }
}

impl PriceOracle for JitterPriceOracle {
    fn quote(&self, symbol: &str) -> Decimal {
        to_quote_scale((self.base_price(symbol) * self.draw_multiplier()).round_dp(2))
    }
}

/// Always quotes the same price, regardless of symbol
#[derive(Debug, Clone, Copy)]
pub struct FixedPriceOracle(pub Decimal);

impl PriceOracle for FixedPriceOracle {
    fn quote(&self, _symbol: &str) -> Decimal {
        self.0
    }
}

/// Drops trailing zeros but keeps one fractional digit, so 97000.00 prints
/// as 97000.0 and 3199.50 as 3199.5.
fn to_quote_scale(price: Decimal) -> Decimal {
    let mut normalized = price.normalize();
    if normalized.scale() < 1 {
        normalized.rescale(1);
    }
    normalized
}
