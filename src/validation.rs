//! Command-line input validation
//!
//! Each single-value check has the `fn(&str) -> Result<T, String>` shape clap
//! expects from a `value_parser`, so bad input is rejected before any
//! request is built. Cross-field rules live in [`check_required_prices`].

use crate::error::{TradingError, TradingResult};
use crate::types::{OrderType, Side, TimeInForce};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn validate_symbol(value: &str) -> Result<String, String> {
    let cleaned = value.trim().to_uppercase();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("Invalid symbol '{}'. Example: BTCUSDT", value));
    }
    Ok(cleaned)
}

pub fn validate_side(value: &str) -> Result<Side, String> {
    Side::from_str(&value.trim().to_uppercase())
        .map_err(|_| format!("Invalid side '{}'. Must be BUY or SELL.", value))
}

pub fn validate_order_type(value: &str) -> Result<OrderType, String> {
    OrderType::from_str(&value.trim().to_uppercase()).map_err(|_| {
        format!(
            "Invalid type '{}'. Must be MARKET, LIMIT or STOP_MARKET.",
            value
        )
    })
}

pub fn validate_time_in_force(value: &str) -> Result<TimeInForce, String> {
    TimeInForce::from_str(&value.trim().to_uppercase())
        .map_err(|_| format!("Invalid time-in-force '{}'. Must be GTC, IOC or FOK.", value))
}

/// Parse a strictly positive decimal, naming `field` in the error
pub fn validate_positive_decimal(value: &str, field: &str) -> Result<Decimal, String> {
    let number = Decimal::from_str(value.trim())
        .map_err(|_| format!("'{}' is not a valid number for {}.", value, field))?;
    if number <= Decimal::ZERO {
        return Err(format!("{} must be greater than zero. Got: {}", field, value));
    }
    Ok(number)
}

pub fn validate_quantity(value: &str) -> Result<Decimal, String> {
    validate_positive_decimal(value, "quantity")
}

pub fn validate_price(value: &str) -> Result<Decimal, String> {
    validate_positive_decimal(value, "price")
}

pub fn validate_stop_price(value: &str) -> Result<Decimal, String> {
    validate_positive_decimal(value, "stop-price")
}

/// LIMIT needs `--price`, STOP_MARKET needs `--stop-price`
pub fn check_required_prices(
    order_type: OrderType,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
) -> TradingResult<()> {
    match order_type {
        OrderType::Limit if price.is_none() => Err(TradingError::InvalidParameter(
            "price".to_string(),
            "--price is required for LIMIT orders.".to_string(),
        )),
        OrderType::StopMarket if stop_price.is_none() => Err(TradingError::InvalidParameter(
            "stop-price".to_string(),
            "--stop-price is required for STOP_MARKET orders.".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_is_normalised() {
        assert_eq!(validate_symbol(" btcusdt ").unwrap(), "BTCUSDT");
        assert_eq!(validate_symbol("ETHUSDT").unwrap(), "ETHUSDT");
    }

    #[test]
    fn test_symbol_rejects_separators() {
        let err = validate_symbol("BTC-USDT").unwrap_err();
        assert!(err.contains("Example: BTCUSDT"));
        assert!(validate_symbol("").is_err());
    }

    #[test]
    fn test_side_and_type_case_insensitive() {
        assert_eq!(validate_side("sell").unwrap(), Side::Sell);
        assert_eq!(validate_order_type("stop_market").unwrap(), OrderType::StopMarket);
        assert!(validate_side("HOLD").unwrap_err().contains("BUY or SELL"));
        assert!(validate_order_type("TRAILING").is_err());
        assert_eq!(validate_time_in_force("ioc").unwrap(), TimeInForce::Ioc);
        assert!(validate_time_in_force("DAY").is_err());
    }

    #[test]
    fn test_positive_decimal() {
        assert_eq!(validate_quantity("0.010").unwrap().to_string(), "0.010");
        assert!(validate_quantity("0").unwrap_err().contains("greater than zero"));
        assert!(validate_price("-5").is_err());
        assert!(validate_stop_price("abc").unwrap_err().contains("stop-price"));
    }

    #[test]
    fn test_required_prices() {
        let price = Some(Decimal::new(3300, 0));

        assert!(check_required_prices(OrderType::Market, None, None).is_ok());
        assert!(check_required_prices(OrderType::Limit, price, None).is_ok());
        assert!(check_required_prices(OrderType::StopMarket, None, price).is_ok());

        let err = check_required_prices(OrderType::Limit, None, price).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(check_required_prices(OrderType::StopMarket, price, None).is_err());
    }
}
