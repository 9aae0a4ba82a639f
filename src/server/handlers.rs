use crate::server::error::ApiError;
use crate::server::state::AppState;
use crate::types::{NewOrderRequest, Order, OrderId};
use axum::{
    extract::{RawQuery, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

/// Form values, first occurrence wins
struct Params(Vec<(String, String)>);

impl Params {
    fn parse(raw: &str) -> Result<Self, ApiError> {
        serde_urlencoded::from_str(raw)
            .map(Params)
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// POST /fapi/v1/order
///
/// Missing fields fall back to the mock protocol defaults: BTCUSDT, BUY,
/// MARKET, quantity "0" (which is then rejected as an invalid quantity).
/// Values go to the simulator unparsed so its check order decides which
/// error a bad request gets.
pub async fn place_order(State(state): State<AppState>, body: String) -> Result<Json<Order>, ApiError> {
    let params = Params::parse(&body)?;

    let request = NewOrderRequest {
        symbol: params.get("symbol").unwrap_or("BTCUSDT").to_string(),
        side: params.get("side").unwrap_or("BUY").to_string(),
        order_type: params.get("type").unwrap_or("MARKET").to_string(),
        quantity: params.get("quantity").unwrap_or("0").to_string(),
        price: params.get("price").map(str::to_string),
        stop_price: params.get("stopPrice").map(str::to_string),
        time_in_force: params.get("timeInForce").map(str::to_string),
    };

    let order = state.simulator.submit(&request)?;
    info!(
        "[MOCK EXCHANGE] {} {} {} {} → orderId={}",
        order.order_type, order.side, order.orig_qty, order.symbol, order.id
    );
    Ok(Json(order))
}

/// GET /fapi/v1/order?orderId=
pub async fn get_order(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Order>, ApiError> {
    let params = Params::parse(query.as_deref().unwrap_or(""))?;

    // An absent id looks up order 0, which never exists.
    let order_id: OrderId = match params.get("orderId") {
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::IllegalParameter("orderId".to_string()))?,
        None => 0,
    };

    let order = state.simulator.query(order_id)?;
    Ok(Json(order))
}

/// GET /fapi/v1/time
pub async fn server_time() -> Json<Value> {
    Json(json!({ "serverTime": Utc::now().timestamp_millis() }))
}
