// Order errors raised by the execution simulator and request parsing

use thiserror::Error;

/// Caller input errors. All of them are synchronous and non-retryable, and
/// none of them mutate the order registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Unsupported order type: {0}")]
    UnsupportedOrderType(String),

    #[error("Invalid quantity '{0}': must be a positive decimal")]
    InvalidQuantity(String),

    #[error("Mandatory parameter 'price' was not sent, was empty/null, or malformed.")]
    MissingPrice,

    #[error("Mandatory parameter 'stopPrice' was not sent, was empty/null, or malformed.")]
    MissingStopPrice,

    #[error("Order does not exist.")]
    OrderNotFound(u64),

    #[error("Invalid side '{0}': must be BUY or SELL")]
    InvalidSide(String),

    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),

    #[error("Invalid timeInForce '{0}': must be GTC, IOC or FOK")]
    InvalidTimeInForce(String),
}

impl OrderError {
    /// Numeric code in the exchange's negative error namespace.
    pub fn code(&self) -> i32 {
        match self {
            OrderError::UnsupportedOrderType(_) => -1100,
            OrderError::InvalidSide(_) => -1100,
            OrderError::InvalidTimeInForce(_) => -1100,
            OrderError::InvalidQuantity(_) => -1013,
            OrderError::MissingPrice | OrderError::MissingStopPrice => -1102,
            OrderError::InvalidSymbol(_) => -1121,
            OrderError::OrderNotFound(_) => -2013,
        }
    }

    /// HTTP status the server answers with.
    pub fn http_status(&self) -> u16 {
        match self {
            OrderError::OrderNotFound(_) => 404,
            _ => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_mock_protocol() {
        assert_eq!(OrderError::UnsupportedOrderType("OCO".into()).code(), -1100);
        assert_eq!(OrderError::OrderNotFound(7).code(), -2013);
        assert_eq!(OrderError::OrderNotFound(7).http_status(), 404);
        assert_eq!(OrderError::MissingPrice.http_status(), 400);
    }

    #[test]
    fn test_messages() {
        let err = OrderError::UnsupportedOrderType("TRAILING_STOP".into());
        assert_eq!(err.to_string(), "Unsupported order type: TRAILING_STOP");
        assert_eq!(OrderError::OrderNotFound(1).to_string(), "Order does not exist.");
    }
}
