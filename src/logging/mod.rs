//! Logging setup for kds-sync-trigger
//!
//! Operators only see a run through its log lines, so every line is
//! timestamped and emitted as structured JSON unless a human-readable
//! format is requested.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Logging error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoggingError {
    /// A global subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Map a configured level name to a tracing level, defaulting to INFO
pub fn parse_level(log_level: &str) -> Level {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Map a configured format name, defaulting to JSON
pub fn parse_format(format: &str) -> LogFormat {
    match format.trim().to_lowercase().as_str() {
        "pretty" | "text" | "plain" => LogFormat::Pretty,
        _ => LogFormat::Json,
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = LevelFilter::from_level(parse_level(&config.level));

    let result = match parse_format(&config.format) {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}
