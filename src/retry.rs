// Retry with exponential backoff for idempotent exchange calls

use crate::error::{TradingError, TradingResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retries only errors where [`TradingError::is_retryable`] holds; anything
/// else is returned on the first failure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
}

impl RetryPolicy {
    pub fn new(
        max_retries: u32,
        base_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> TradingResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<TradingError>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 0;

        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error.into(),
            };

            if attempt >= self.max_retries || !error.is_retryable() {
                return Err(error);
            }
            attempt += 1;

            warn!(
                "Attempt {}/{} failed, retrying in {:?}: {}",
                attempt,
                self.max_retries + 1,
                delay,
                error
            );
            sleep(delay).await;

            delay = std::cmp::min(delay.mul_f64(self.backoff_multiplier), self.max_delay);
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            2,                          // 2 retries
            Duration::from_millis(250), // 250ms base delay
            Duration::from_secs(2),     // 2s max delay
            2.0,                        // Double delay each time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1), Duration::from_millis(5), 2.0)
    }

    #[tokio::test]
    async fn test_retries_transport_failures_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = quick(3)
            .execute(move || async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err(ClientError::Transport("refused".to_string())),
                    _ => Ok(42),
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: TradingResult<()> = quick(2)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Timeout("slow".to_string()))
            })
            .await;

        assert!(matches!(result, Err(TradingError::ApiTimeout(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exchange_rejections_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: TradingResult<()> = quick(5)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Api {
                    code: -2013,
                    msg: "Order does not exist.".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(TradingError::ApiRejected { code: -2013, .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
