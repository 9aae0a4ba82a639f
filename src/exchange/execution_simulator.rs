// Execution Simulator
// Validates incoming orders, assigns their ids, fills market orders at the
// oracle price and keeps every order in an append-only registry

use crate::exchange::error::OrderError;
use crate::exchange::price_oracle::PriceOracle;
use crate::types::{NewOrderRequest, Order, OrderId, OrderStatus, OrderType, Side, TimeInForce};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

/// Counter value of a fresh simulator; the first order gets id 1001.
pub const INITIAL_ORDER_COUNTER: OrderId = 1000;

#[derive(Debug)]
struct OrderRegistry {
    last_id: OrderId,
    orders: HashMap<OrderId, Order>,
}

/// Single-venue execution simulator.
///
/// Id allocation and the registry insert happen under one write lock, so
/// concurrent submissions always get distinct, contiguous ids and readers
/// never see a half-built order. There is no trigger path for resting
/// orders: LIMIT and STOP_MARKET orders stay `NEW` for the lifetime of the
/// simulator.
pub struct ExecutionSimulator {
    oracle: Arc<dyn PriceOracle>,
    registry: RwLock<OrderRegistry>,
}

impl ExecutionSimulator {
    pub fn new(oracle: Arc<dyn PriceOracle>) -> Self {
        Self {
            oracle,
            registry: RwLock::new(OrderRegistry {
                last_id: INITIAL_ORDER_COUNTER,
                orders: HashMap::new(),
            }),
        }
    }

    /// Validate and record a new order.
    ///
    /// Checks run in a fixed order and the first failure wins: order type,
    /// quantity, limit price, stop price, side, time in force (LIMIT only),
    /// then symbol. A failed submission leaves the registry untouched.
    pub fn submit(&self, request: &NewOrderRequest) -> Result<Order, OrderError> {
        let order_type = OrderType::from_str(&request.order_type)?;

        let quantity = parse_positive(&request.quantity)
            .ok_or_else(|| OrderError::InvalidQuantity(request.quantity.clone()))?;

        let price = match order_type {
            OrderType::Limit => request
                .price
                .as_deref()
                .and_then(parse_positive)
                .ok_or(OrderError::MissingPrice)?,
            _ => Decimal::ZERO,
        };

        let stop_price = match order_type {
            OrderType::StopMarket => request
                .stop_price
                .as_deref()
                .and_then(parse_positive)
                .ok_or(OrderError::MissingStopPrice)?,
            _ => Decimal::ZERO,
        };

        let side = Side::from_str(&request.side)?;

        // Only LIMIT orders carry a time in force; others ignore the field.
        let time_in_force = match (order_type, request.time_in_force.as_deref()) {
            (OrderType::Limit, Some(raw)) => TimeInForce::from_str(raw)?,
            _ => TimeInForce::Gtc,
        };

        if !is_valid_symbol(&request.symbol) {
            return Err(OrderError::InvalidSymbol(request.symbol.clone()));
        }

        let (status, executed_qty, avg_price) = match order_type {
            OrderType::Market => (
                OrderStatus::Filled,
                quantity,
                self.oracle.quote(&request.symbol),
            ),
            OrderType::Limit | OrderType::StopMarket => {
                (OrderStatus::New, Decimal::ZERO, Decimal::ZERO)
            }
        };

        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry.last_id += 1;

        let order = Order {
            id: registry.last_id,
            symbol: request.symbol.clone(),
            side,
            order_type,
            status,
            orig_qty: quantity,
            executed_qty,
            avg_price,
            price,
            stop_price,
            time_in_force,
            update_time: Utc::now().timestamp_millis(),
        };
        registry.orders.insert(order.id, order.clone());

        Ok(order)
    }

    /// Snapshot of a previously submitted order
    pub fn query(&self, order_id: OrderId) -> Result<Order, OrderError> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// Id of the most recently accepted order, or the initial counter value
    pub fn last_order_id(&self) -> OrderId {
        self.registry.read().unwrap_or_else(PoisonError::into_inner).last_id
    }

    pub fn len(&self) -> usize {
        self.registry.read().unwrap_or_else(PoisonError::into_inner).orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_positive(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric())
}
