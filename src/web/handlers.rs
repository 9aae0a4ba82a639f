use crate::client::ClientError;
use crate::orders;
use crate::types::{Order, OrderType, Side, TimeInForce};
use crate::validation;
use crate::web::error::WebError;
use crate::web::WebState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::{error, info};

/// Order form as posted by a browser. Numbers may arrive as JSON numbers
/// or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebOrderRequest {
    symbol: Option<String>,
    side: Option<String>,
    #[serde(rename = "type")]
    order_type: Option<String>,
    quantity: Option<Value>,
    price: Option<Value>,
    #[serde(rename = "stopPrice")]
    stop_price: Option<Value>,
    #[serde(rename = "timeInForce")]
    time_in_force: Option<String>,
}

/// Text of a form value; null, empty strings and zero count as absent.
fn field_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

fn normalized(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_uppercase()
}

/// POST /api/order
pub async fn place_order(
    State(state): State<WebState>,
    body: String,
) -> Result<Json<Value>, WebError> {
    let request: WebOrderRequest = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(fields)) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields))
                .map_err(|e| WebError::BadRequest(e.to_string()))?
        }
        _ => return Err(WebError::BadRequest("No data received.".to_string())),
    };

    let symbol = normalized(&request.symbol);
    if symbol.is_empty() {
        return Err(WebError::BadRequest("Symbol is required.".to_string()));
    }
    let side = Side::from_str(&normalized(&request.side))
        .map_err(|_| WebError::BadRequest("Side must be BUY or SELL.".to_string()))?;
    let order_type = OrderType::from_str(&normalized(&request.order_type))
        .map_err(|_| WebError::BadRequest("Invalid order type.".to_string()))?;
    let quantity = field_text(&request.quantity)
        .ok_or_else(|| WebError::BadRequest("Quantity is required.".to_string()))?;

    info!("Web order → {} {} {} qty={}", side, order_type, symbol, quantity);

    let client = &state.client;
    let result = match order_type {
        OrderType::Market => orders::place_market_order(client, &symbol, side, &quantity).await,
        OrderType::Limit => {
            let price = field_text(&request.price).ok_or_else(|| {
                WebError::BadRequest("Price is required for LIMIT orders.".to_string())
            })?;
            let time_in_force = match &request.time_in_force {
                Some(raw) => validation::validate_time_in_force(raw).map_err(WebError::BadRequest)?,
                None => TimeInForce::Gtc,
            };
            orders::place_limit_order(client, &symbol, side, &quantity, &price, time_in_force).await
        }
        OrderType::StopMarket => {
            let stop_price = field_text(&request.stop_price).ok_or_else(|| {
                WebError::BadRequest("Stop price is required for STOP_MARKET orders.".to_string())
            })?;
            orders::place_stop_market_order(client, &symbol, side, &quantity, &stop_price).await
        }
    };

    let order = result.map_err(|err| {
        match &err {
            ClientError::Api { code, msg } => error!("API error {}: {}", code, msg),
            other => error!("Unexpected error: {}", other),
        }
        WebError::from(err)
    })?;

    state.record(order.clone());
    info!("Order success → orderId={}", order.id);
    Ok(Json(json!({ "success": true, "order": order })))
}

/// GET /api/orders, newest first
pub async fn list_orders(State(state): State<WebState>) -> Json<Vec<Order>> {
    Json(state.history())
}
