//! Sync trigger infrastructure
//!
//! This module invokes the KDS to Airtable sync Edge Function with bounded
//! retries, a per-attempt timeout and fixed per-condition backoff delays.
//!
//! # Components
//!
//! - [`http_client`]: Performs one POST to the function and classifies the result
//! - [`retry`]: Retry manager with per-condition delays and an injectable sleeper
//! - [`trigger`]: Composes the two into a single run producing an [`Outcome`](crate::models::Outcome)
//!
//! # Example
//!
//! ```ignore
//! use kds_sync_trigger::config::Config;
//! use kds_sync_trigger::sync::trigger;
//!
//! let config = Config::from_env()?;
//! let outcome = trigger::run(&config).await;
//! std::process::exit(outcome.exit_code() as i32);
//! ```

pub mod http_client;
pub mod retry;
pub mod trigger;

// Re-export main types for convenience
pub use http_client::TriggerClient;
pub use retry::{RetryManager, RetryReport, Sleeper, TokioSleeper};
pub use trigger::SyncTrigger;
