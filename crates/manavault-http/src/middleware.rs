//! HTTP middleware for retry logic

use std::time::Duration;

use tracing::{debug, warn};

use crate::{error::HttpError, Result};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retry attempts (not counting the first try)
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Calculate delay for given attempt number
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        std::cmp::min(delay, self.max_delay)
    }
}

/// Retry middleware for HTTP operations
pub struct RetryMiddleware {
    config: RetryConfig,
}

impl RetryMiddleware {
    /// Create new retry middleware
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute operation with retry logic.
    ///
    /// Non-retryable errors are returned as-is. When every attempt fails with
    /// a retryable error the result is [`HttpError::RetryLimitExceeded`].
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        for attempt in 0..=self.config.max_attempts {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!("Request succeeded after {attempt} retries");
                    }
                    return Ok(result);
                }
                Err(e) if !e.is_retryable() => {
                    debug!("Non-retryable error: {e}");
                    return Err(e);
                }
                Err(e) if attempt < self.config.max_attempts => {
                    let delay = self.config.calculate_delay(attempt);
                    warn!(
                        "Request failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt + 1,
                        self.config.max_attempts + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!("Giving up after {} attempts: {}", attempt + 1, e);
                }
            }
        }

        Err(HttpError::RetryLimitExceeded {
            attempts: self.config.max_attempts + 1,
        })
    }
}
