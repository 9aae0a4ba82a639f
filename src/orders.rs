// Order placement helpers on top of the exchange client

use crate::client::{ClientError, ExchangeClient};
use crate::types::{NewOrderRequest, Order, Side, TimeInForce};
use rust_decimal::Decimal;
use tracing::info;

pub async fn place_market_order(
    client: &ExchangeClient,
    symbol: &str,
    side: Side,
    quantity: &str,
) -> Result<Order, ClientError> {
    let order = client
        .new_order(&NewOrderRequest::market(symbol, side, quantity))
        .await?;
    info!("Market order done. orderId={} avgPrice={}", order.id, order.avg_price);
    Ok(order)
}

pub async fn place_limit_order(
    client: &ExchangeClient,
    symbol: &str,
    side: Side,
    quantity: &str,
    price: &str,
    time_in_force: TimeInForce,
) -> Result<Order, ClientError> {
    let order = client
        .new_order(&NewOrderRequest::limit(symbol, side, quantity, price, time_in_force))
        .await?;
    info!("Limit order placed. orderId={} status={}", order.id, order.status);
    Ok(order)
}

pub async fn place_stop_market_order(
    client: &ExchangeClient,
    symbol: &str,
    side: Side,
    quantity: &str,
    stop_price: &str,
) -> Result<Order, ClientError> {
    let order = client
        .new_order(&NewOrderRequest::stop_market(symbol, side, quantity, stop_price))
        .await?;
    info!("Stop-market order placed. orderId={}", order.id);
    Ok(order)
}

/// Labelled response fields for display, skipping zero-valued ones
pub fn response_rows(order: &Order) -> Vec<(&'static str, String)> {
    let rows = [
        ("Order ID", order.id.to_string()),
        ("Status", order.status.to_string()),
        ("Symbol", order.symbol.clone()),
        ("Side", order.side.to_string()),
        ("Type", order.order_type.to_string()),
        ("Orig Qty", order.orig_qty.to_string()),
        ("Executed Qty", order.executed_qty.to_string()),
        ("Avg Price", order.avg_price.to_string()),
        ("Limit Price", order.price.to_string()),
        ("Stop Price", order.stop_price.to_string()),
        ("Time In Force", order.time_in_force.to_string()),
    ];

    rows.into_iter()
        .filter(|(_, value)| !is_zero_display(value))
        .collect()
}

fn is_zero_display(value: &str) -> bool {
    match value.parse::<Decimal>() {
        Ok(number) => number.is_zero(),
        Err(_) => value.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, OrderType};

    #[test]
    fn test_zero_detection() {
        assert!(is_zero_display("0"));
        assert!(is_zero_display("0.00000000"));
        assert!(!is_zero_display("0.01"));
        assert!(!is_zero_display("3300"));
        assert!(!is_zero_display("1001"));
    }

    #[test]
    fn test_response_rows_hide_zero_fields() {
        let order = Order {
            id: 1002,
            symbol: "ETHUSDT".to_string(),
            side: Side::Sell,
            order_type: OrderType::Limit,
            status: OrderStatus::New,
            orig_qty: Decimal::new(1, 0),
            executed_qty: Decimal::ZERO,
            avg_price: Decimal::ZERO,
            price: Decimal::new(3300, 0),
            stop_price: Decimal::ZERO,
            time_in_force: TimeInForce::Gtc,
            update_time: 0,
        };

        let labels: Vec<_> = response_rows(&order).into_iter().map(|(label, _)| label).collect();
        assert!(labels.contains(&"Limit Price"));
        assert!(!labels.contains(&"Executed Qty"));
        assert!(!labels.contains(&"Avg Price"));
        assert!(!labels.contains(&"Stop Price"));
    }
}
