// Common types used across the application

use crate::exchange::OrderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type OrderId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Filled,
}

/// Accepted and echoed back, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopMarket => "STOP_MARKET",
        }
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Filled => "FILLED",
        }
    }
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(OrderError::InvalidSide(other.to_string())),
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_MARKET" => Ok(OrderType::StopMarket),
            other => Err(OrderError::UnsupportedOrderType(other.to_string())),
        }
    }
}

impl FromStr for TimeInForce {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GTC" => Ok(TimeInForce::Gtc),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            other => Err(OrderError::InvalidTimeInForce(other.to_string())),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Side, OrderType, OrderStatus, TimeInForce);

/// An order as stored by the exchange and as it appears on the wire.
///
/// Decimal fields serialize as strings so no precision is lost in transit.
/// `price` and `stop_price` are zero when they do not apply to the order type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId")]
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(rename = "origQty")]
    pub orig_qty: Decimal,
    #[serde(rename = "executedQty")]
    pub executed_qty: Decimal,
    #[serde(rename = "avgPrice")]
    pub avg_price: Decimal,
    pub price: Decimal,
    #[serde(rename = "stopPrice")]
    pub stop_price: Decimal,
    #[serde(rename = "timeInForce")]
    pub time_in_force: TimeInForce,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "updateTime")]
    pub update_time: i64,
}

/// Raw order submission as it arrives from a caller.
///
/// Every field stays unparsed here; the execution simulator owns their
/// validation so the precondition order is fixed in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(rename = "stopPrice", default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    #[serde(rename = "timeInForce", default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
}

impl NewOrderRequest {
    pub fn market(symbol: &str, side: Side, quantity: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: side.as_str().to_string(),
            order_type: OrderType::Market.as_str().to_string(),
            quantity: quantity.to_string(),
            ..Default::default()
        }
    }

    pub fn limit(symbol: &str, side: Side, quantity: &str, price: &str, tif: TimeInForce) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: side.as_str().to_string(),
            order_type: OrderType::Limit.as_str().to_string(),
            quantity: quantity.to_string(),
            price: Some(price.to_string()),
            time_in_force: Some(tif.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn stop_market(symbol: &str, side: Side, quantity: &str, stop_price: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: side.as_str().to_string(),
            order_type: OrderType::StopMarket.as_str().to_string(),
            quantity: quantity.to_string(),
            stop_price: Some(stop_price.to_string()),
            ..Default::default()
        }
    }
}
