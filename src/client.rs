// Mock exchange REST client
// Signs requests, decodes order responses and maps `{code, msg}` bodies to errors

use crate::config::ExchangeConfig;
use crate::signing::{self, API_KEY_HEADER, SIGNATURE_PARAM};
use crate::types::{NewOrderRequest, Order, OrderId};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";
pub const TIME_ENDPOINT: &str = "/fapi/v1/time";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The exchange answered with an error body
    #[error("API error {code}: {msg}")]
    Api { code: i32, msg: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServerTime {
    #[serde(rename = "serverTime")]
    server_time: i64,
}

#[derive(Debug, Clone)]
pub struct ExchangeClient {
    client: reqwest::Client,
    base_url: String,
    api_secret: String,
}

impl ExchangeClient {
    pub fn new(config: &ExchangeConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClientError::Transport(format!("invalid API key header: {}", e)))?;
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        debug!("Client ready → {}", base_url);

        Ok(Self {
            client,
            base_url,
            api_secret: config.api_secret.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a new order (signed POST)
    pub async fn new_order(&self, request: &NewOrderRequest) -> Result<Order, ClientError> {
        info!(
            "Placing {} {} | symbol={} qty={} price={}",
            request.side,
            request.order_type,
            request.symbol,
            request.quantity,
            request.price.as_deref().unwrap_or("N/A"),
        );
        self.request(Method::POST, ORDER_ENDPOINT, order_params(request), true)
            .await
    }

    /// Look up an order by id (signed GET)
    pub async fn query_order(&self, order_id: OrderId) -> Result<Order, ClientError> {
        let params = vec![("orderId".to_string(), order_id.to_string())];
        self.request(Method::GET, ORDER_ENDPOINT, params, true).await
    }

    /// Exchange clock in milliseconds since the epoch
    pub async fn server_time(&self) -> Result<i64, ClientError> {
        let time: ServerTime = self
            .request(Method::GET, TIME_ENDPOINT, Vec::new(), false)
            .await?;
        Ok(time.server_time)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        mut params: Vec<(String, String)>,
        signed: bool,
    ) -> Result<T, ClientError> {
        if signed {
            signing::sign_params(&self.api_secret, &mut params, Utc::now().timestamp_millis());
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let safe: Vec<_> = params.iter().filter(|(k, _)| k != SIGNATURE_PARAM).collect();
        debug!("→ {} {} | {:?}", method, endpoint, safe);

        let builder = if method == Method::GET {
            self.client.get(&url).query(&params)
        } else {
            self.client.request(method, &url).form(&params)
        };

        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from(e);
            match &err {
                ClientError::Timeout(_) => error!("Request timed out."),
                _ => error!("Cannot connect. Is mock server running?"),
            }
            err
        })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("← status={} | {}", status.as_u16(), truncate(&body, 500));

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ClientError::Decode(format!("status {}: {}", status.as_u16(), e)))?;

        if let Some(code) = value.get("code").and_then(Value::as_i64) {
            if code != 0 && code != 200 {
                let msg = value
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string();
                let code = i32::try_from(code)
                    .map_err(|_| ClientError::Decode(format!("error code {} out of range", code)))?;
                return Err(ClientError::Api { code, msg });
            }
        }

        if !status.is_success() {
            return Err(ClientError::Decode(format!("HTTP status {}", status.as_u16())));
        }

        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn order_params(request: &NewOrderRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("symbol".to_string(), request.symbol.clone()),
        ("side".to_string(), request.side.clone()),
        ("type".to_string(), request.order_type.clone()),
        ("quantity".to_string(), request.quantity.clone()),
    ];
    if let Some(price) = &request.price {
        params.push(("price".to_string(), price.clone()));
    }
    if let Some(stop_price) = &request.stop_price {
        params.push(("stopPrice".to_string(), stop_price.clone()));
    }
    if let Some(tif) = &request.time_in_force {
        params.push(("timeInForce".to_string(), tif.clone()));
    }
    params
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
