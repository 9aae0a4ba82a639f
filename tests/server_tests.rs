// Integration tests for the mock exchange HTTP layer

mod common;

use axum::body::{self, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use common::fixed_exchange;
use serde_json::Value;
use tower::ServiceExt;
use trading_bot::signing;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/fapi/v1/order")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn signed_form(pairs: &[(&str, &str)], secret: &str) -> String {
    let mut params: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    signing::sign_params(secret, &mut params, Utc::now().timestamp_millis());
    signing::canonical_query(&params)
}

#[tokio::test]
async fn test_market_order_over_http() {
    let app = fixed_exchange(false).router();

    let (status, body) = send(
        &app,
        post_form("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], 1001);
    assert_eq!(body["status"], "FILLED");
    assert_eq!(body["executedQty"], "0.01");
    assert_eq!(body["avgPrice"], "97000.0");
    assert_eq!(body["price"], "0");
    assert_eq!(body["type"], "MARKET");
}

#[tokio::test]
async fn test_limit_order_then_query() {
    let app = fixed_exchange(false).router();

    let (status, placed) = send(
        &app,
        post_form("symbol=ETHUSDT&side=SELL&type=LIMIT&quantity=1&price=3300&timeInForce=IOC"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["status"], "NEW");
    assert_eq!(placed["executedQty"], "0");
    assert_eq!(placed["price"], "3300");
    assert_eq!(placed["timeInForce"], "IOC");

    let uri = format!("/fapi/v1/order?orderId={}", placed["orderId"]);
    let (status, fetched) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, placed);
}

#[tokio::test]
async fn test_error_bodies() {
    let app = fixed_exchange(false).router();

    let (status, body) = send(&app, post_form("symbol=BTCUSDT&side=BUY&type=OCO&quantity=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1100);

    let (_, body) = send(&app, post_form("symbol=BTCUSDT&side=BUY&type=MARKET")).await;
    assert_eq!(body["code"], -1013);

    let (_, body) = send(&app, post_form("symbol=BTCUSDT&side=BUY&type=LIMIT&quantity=1")).await;
    assert_eq!(body["code"], -1102);

    let (_, body) = send(&app, post_form("symbol=BTC-USDT&side=BUY&type=MARKET&quantity=1")).await;
    assert_eq!(body["code"], -1121);

    let (_, body) = send(&app, post_form("symbol=BTCUSDT&side=HOLD&type=MARKET&quantity=1")).await;
    assert_eq!(body["code"], -1100);

    let (status, body) = send(&app, get("/fapi/v1/order?orderId=424242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], -2013);
    assert_eq!(body["msg"], "Order does not exist.");

    let (status, body) = send(&app, get("/fapi/v1/order?orderId=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1100);
}

#[tokio::test]
async fn test_earliest_failing_check_decides_the_error() {
    let app = fixed_exchange(false).router();

    // Type is checked before side
    let (_, body) = send(&app, post_form("symbol=BTCUSDT&side=HOLD&type=OCO&quantity=1")).await;
    assert_eq!(body["code"], -1100);
    assert_eq!(body["msg"], "Unsupported order type: OCO");

    // Quantity is checked before time in force
    let (_, body) = send(
        &app,
        post_form("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0&timeInForce=DAY"),
    )
    .await;
    assert_eq!(body["code"], -1013);

    // Side is checked before symbol
    let (_, body) = send(&app, post_form("symbol=BTC-USDT&side=HOLD&type=MARKET&quantity=1")).await;
    assert_eq!(body["code"], -1100);
    assert_eq!(body["msg"], "Invalid side 'HOLD': must be BUY or SELL");

    // Only LIMIT orders read timeInForce
    let (status, body) = send(
        &app,
        post_form("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=1&timeInForce=GTX"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeInForce"], "GTC");

    let (_, body) = send(
        &app,
        post_form("symbol=BTCUSDT&side=BUY&type=LIMIT&quantity=1&price=3300&timeInForce=GTX"),
    )
    .await;
    assert_eq!(body["code"], -1100);
}

#[tokio::test]
async fn test_missing_fields_use_protocol_defaults() {
    let app = fixed_exchange(false).router();

    let (status, body) = send(&app, post_form("quantity=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "BTCUSDT");
    assert_eq!(body["side"], "BUY");
    assert_eq!(body["type"], "MARKET");

    let (status, body) = send(&app, get("/fapi/v1/order")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], -2013);
}

#[tokio::test]
async fn test_server_time() {
    let app = fixed_exchange(true).router();
    let before = Utc::now().timestamp_millis();

    // Unsigned even when verification is on
    let (status, body) = send(&app, get("/fapi/v1/time")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["serverTime"].as_i64().unwrap() >= before);
}

#[tokio::test]
async fn test_signed_requests_accepted() {
    let app = fixed_exchange(true).router();

    let form = signed_form(
        &[("symbol", "BTCUSDT"), ("side", "BUY"), ("type", "MARKET"), ("quantity", "0.01")],
        "mock_secret",
    );
    let mut request = post_form(&form);
    request.headers_mut().insert("X-MBX-APIKEY", "mock_key".parse().unwrap());

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FILLED");

    let query = signed_form(&[("orderId", "1001")], "mock_secret");
    let mut request = get(&format!("/fapi/v1/order?{}", query));
    request.headers_mut().insert("X-MBX-APIKEY", "mock_key".parse().unwrap());

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], 1001);
}

#[tokio::test]
async fn test_unsigned_or_tampered_requests_rejected() {
    let exchange = fixed_exchange(true);
    let simulator = exchange.simulator();
    let app = exchange.router();

    let (status, body) = send(&app, post_form("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], -2014);

    let form = signed_form(&[("symbol", "BTCUSDT"), ("quantity", "1")], "wrong_secret");
    let mut request = post_form(&form);
    request.headers_mut().insert("X-MBX-APIKEY", "mock_key".parse().unwrap());
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], -1022);

    let mut request = post_form(&form);
    request.headers_mut().insert("X-MBX-APIKEY", "other_key".parse().unwrap());
    let (_, body) = send(&app, request).await;
    assert_eq!(body["code"], -2015);

    assert!(simulator.is_empty());
}
