//! Request authentication for the mock exchange
//!
//! Runs as a route layer in front of the order handlers, so order logic
//! never sees an unauthenticated request. The layer buffers form bodies to
//! read the signed parameters and hands the same bytes on to the handler.

use crate::config::Config;
use crate::server::error::ApiError;
use crate::signing::{self, SignatureError, API_KEY_HEADER, TIMESTAMP_PARAM};
use axum::{
    body::{self, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Allowed clock skew for timestamps ahead of the server
const MAX_FUTURE_SKEW_MS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("API-key format invalid.")]
    MissingApiKey,

    #[error("Invalid API-key, IP, or permissions for action.")]
    UnknownApiKey,

    #[error("Mandatory parameter 'timestamp' was not sent, was empty/null, or malformed.")]
    MissingTimestamp,

    #[error("Timestamp for this request is outside of the recvWindow.")]
    StaleTimestamp,

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl AuthError {
    pub fn code(&self) -> i32 {
        match self {
            AuthError::MissingApiKey => -2014,
            AuthError::UnknownApiKey => -2015,
            AuthError::MissingTimestamp => -1102,
            AuthError::StaleTimestamp => -1021,
            AuthError::Signature(SignatureError::Missing) => -1102,
            AuthError::Signature(_) => -1022,
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            AuthError::MissingTimestamp
            | AuthError::StaleTimestamp
            | AuthError::Signature(SignatureError::Missing) => 400,
            _ => 401,
        }
    }
}

/// Credentials and replay window the exchange accepts
#[derive(Debug, Clone)]
pub struct Authenticator {
    api_key: String,
    api_secret: String,
    recv_window_ms: i64,
}

impl Authenticator {
    pub fn new(api_key: &str, api_secret: &str, recv_window_ms: i64) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            recv_window_ms,
        }
    }

    /// `Some` only when signature verification is switched on
    pub fn from_config(config: &Config) -> Option<Self> {
        config.server.verify_signatures.then(|| {
            Self::new(
                &config.exchange.api_key,
                &config.exchange.api_secret,
                config.exchange.recv_window_ms,
            )
        })
    }

    /// Check key, timestamp and signature, in that order
    pub fn verify(
        &self,
        api_key: Option<&str>,
        params: &[(String, String)],
        now_ms: i64,
    ) -> Result<(), AuthError> {
        let api_key = api_key.ok_or(AuthError::MissingApiKey)?;
        if api_key != self.api_key {
            return Err(AuthError::UnknownApiKey);
        }

        let timestamp: i64 = params
            .iter()
            .find(|(key, _)| key == TIMESTAMP_PARAM)
            .and_then(|(_, value)| value.parse().ok())
            .ok_or(AuthError::MissingTimestamp)?;

        if timestamp > now_ms + MAX_FUTURE_SKEW_MS || now_ms - timestamp > self.recv_window_ms {
            return Err(AuthError::StaleTimestamp);
        }

        signing::verify_params(&self.api_secret, params)?;
        Ok(())
    }
}

/// Route layer verifying signed requests
pub async fn verify_signature(
    State(auth): State<Arc<Authenticator>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::Malformed(e.to_string()))?;

    let mut params: Vec<(String, String)> = match parts.uri.query() {
        Some(query) => serde_urlencoded::from_str(query)
            .map_err(|e| ApiError::Malformed(e.to_string()))?,
        None => Vec::new(),
    };
    if !bytes.is_empty() {
        let form: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        params.extend(form);
    }

    let api_key = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = auth.verify(api_key, &params, Utc::now().timestamp_millis()) {
        warn!("Rejected {} {}: {}", parts.method, parts.uri.path(), err);
        return Err(err.into());
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
