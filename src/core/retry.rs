//! Bounded retry with exponential backoff for upstream calls.
//!
//! Only [`RouterError::is_retryable`] failures are retried. Validation and
//! content errors return on the first attempt.

use super::config::RetryConfig;
use super::errors::RouterResult;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
        }
    }
}

impl RetryPolicy {
    fn next_delay(&self, delay: Duration) -> Duration {
        std::cmp::min(
            Duration::from_millis((delay.as_millis() as f64 * self.backoff_multiplier) as u64),
            self.max_delay,
        )
    }
}

/// Run `operation`, retrying retryable failures up to `policy.max_retries` extra times.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, label: &str, mut operation: F) -> RouterResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RouterResult<T>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                warn!(
                    operation = label,
                    attempt,
                    error = %err,
                    "Retryable failure, backing off for {:?}", delay
                );
                tokio::time::sleep(delay).await;
                delay = policy.next_delay(delay);
            }
            Err(err) => {
                if attempt > 0 {
                    info!(operation = label, attempts = attempt + 1, "Giving up");
                }
                return Err(err);
            }
        }
    }
}
