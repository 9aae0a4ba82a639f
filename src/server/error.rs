use crate::exchange::OrderError;
use crate::server::auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure the mock exchange reports, rendered as `{code, msg}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Illegal characters found in parameter '{0}'")]
    IllegalParameter(String),

    #[error("Malformed request body: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn code(&self) -> i32 {
        match self {
            ApiError::Order(err) => err.code(),
            ApiError::Auth(err) => err.code(),
            ApiError::IllegalParameter(_) | ApiError::Malformed(_) => -1100,
        }
    }

    pub fn status(&self) -> StatusCode {
        let status = match self {
            ApiError::Order(err) => err.http_status(),
            ApiError::Auth(err) => err.http_status(),
            ApiError::IllegalParameter(_) | ApiError::Malformed(_) => 400,
        };
        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code(),
            "msg": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
