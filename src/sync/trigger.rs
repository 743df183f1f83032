//! The sync trigger run
//!
//! A run checks configuration, then invokes the sync function through the
//! retry manager and reports the terminal [`Outcome`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::AppError;
use crate::models::Outcome;

use super::http_client::TriggerClient;
use super::retry::{RetryManager, Sleeper, TokioSleeper};

/// Invokes the KDS to Airtable sync function with retries
#[derive(Debug, Clone)]
pub struct SyncTrigger {
    client: TriggerClient,
    retry: RetryManager,
}

impl SyncTrigger {
    /// Build a trigger from validated configuration
    ///
    /// Fails before any network activity if either credential is missing.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Build a trigger with a custom sleeper for retry delays
    pub fn with_sleeper(config: &Config, sleeper: Arc<dyn Sleeper>) -> Result<Self, AppError> {
        config.validate()?;

        let client = TriggerClient::new(&config.supabase, config.retry.request_timeout())?;
        let retry = RetryManager::with_sleeper(config.retry.clone(), sleeper);

        Ok(Self::new(client, retry))
    }

    pub fn new(client: TriggerClient, retry: RetryManager) -> Self {
        Self { client, retry }
    }

    /// Run the attempt loop once and log the outcome
    pub async fn run(&self) -> Outcome {
        info!(
            url = %self.client.url(),
            started_at = %Utc::now().to_rfc3339(),
            max_attempts = self.retry.config().max_attempts(),
            timeout_secs = self.client.timeout().as_secs_f64(),
            "Starting KDS to Airtable sync"
        );

        let report = self.retry.execute(|| self.client.invoke()).await;

        match report.result {
            Ok(payload) => {
                info!(
                    attempts = report.attempts,
                    response = %payload,
                    "Sync completed successfully"
                );
                Outcome::Success {
                    payload,
                    attempts: report.attempts,
                }
            }
            Err(err) => {
                error!(
                    attempts = report.attempts,
                    error = %err,
                    full_error = ?err,
                    "Sync failed"
                );
                Outcome::Failed {
                    error: err,
                    attempts: report.attempts,
                }
            }
        }
    }
}

/// Run the trigger against the given configuration
pub async fn run(config: &Config) -> Outcome {
    run_with_sleeper(config, Arc::new(TokioSleeper)).await
}

/// Run the trigger with a custom sleeper for retry delays
pub async fn run_with_sleeper(config: &Config, sleeper: Arc<dyn Sleeper>) -> Outcome {
    match SyncTrigger::with_sleeper(config, sleeper) {
        Ok(trigger) => trigger.run().await,
        Err(AppError::Config(err)) => {
            error!(error = %err, "Invalid configuration, sync not attempted");
            Outcome::ConfigurationError(err)
        }
        Err(AppError::Sync(err)) => {
            error!(error = %err, full_error = ?err, "Failed to prepare sync request");
            Outcome::Failed {
                error: err,
                attempts: 0,
            }
        }
    }
}
