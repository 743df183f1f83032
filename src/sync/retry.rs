//! Retry manager for the sync trigger call
//!
//! Each retryable condition has its own fixed delay; there is no exponential
//! growth and no jitter. Delays go through a [`Sleeper`] so callers can
//! observe them without waiting on the wall clock.

use crate::config::RetryConfig;
use crate::error::RetryableError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Suspends the current task between attempts
#[async_trait]
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    /// Wait for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Final result of a retried operation together with the attempts it took
#[derive(Debug, Clone, PartialEq)]
pub struct RetryReport<T, E> {
    /// Result of the last attempt
    pub result: Result<T, E>,
    /// Attempts made, including the first
    pub attempts: u32,
}

/// Retry manager with fixed per-condition backoff
#[derive(Debug, Clone)]
pub struct RetryManager {
    config: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryManager {
    /// Create a RetryManager with the given sleeper
    pub fn with_sleeper(config: RetryConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { config, sleeper }
    }

    /// Execute an async operation with retry logic
    ///
    /// Attempts run strictly one after another. A failed attempt is retried
    /// only when its error reports a retry condition and retries remain;
    /// anything else ends the loop with that error.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> RetryReport<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + std::fmt::Display,
    {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0u32;

        loop {
            info!(
                attempt = attempt + 1,
                max_attempts = max_attempts,
                "Invoking sync function"
            );

            let err = match operation().await {
                Ok(result) => {
                    return RetryReport {
                        result: Ok(result),
                        attempts: attempt + 1,
                    }
                }
                Err(err) => err,
            };

            let Some(condition) = err.retry_condition() else {
                error!(
                    attempt = attempt + 1,
                    error = %err,
                    "Non-retryable error"
                );
                return RetryReport {
                    result: Err(err),
                    attempts: attempt + 1,
                };
            };

            if attempt >= self.config.max_retries {
                warn!(
                    attempts = attempt + 1,
                    max_retries = self.config.max_retries,
                    condition = %condition,
                    "Max retries exhausted"
                );
                return RetryReport {
                    result: Err(err),
                    attempts: attempt + 1,
                };
            }

            let delay = self.config.delay_for(condition);
            warn!(
                attempt = attempt + 1,
                max_retries = self.config.max_retries,
                condition = %condition,
                delay_secs = delay.as_secs_f64(),
                error = %err,
                "Retrying after transient error"
            );

            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    /// Get the retry configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}
