//! Error types for kds-sync-trigger
//!
//! This module defines the error taxonomy used by the sync trigger.
//! All error types use `thiserror` for ergonomic error handling.

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by a single attempt to invoke the sync function
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyncError {
    /// Gateway-class failure (502/504) that is expected to clear on its own
    #[error("HTTP {status}: {body}")]
    RetryableHttp { status: u16, body: String },

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The attempt did not complete within the per-attempt deadline
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Connection-level failure (refused, reset, name resolution)
    #[error("Network error: {0}")]
    Network(String),

    /// Anything that does not fit the categories above
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::RetryableHttp { status, .. } | SyncError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Application-level error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sync error
    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),
}

/// Condition under which a failed attempt may be retried
///
/// Each condition maps to its own fixed delay in [`crate::config::RetryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// HTTP 502
    BadGateway,
    /// HTTP 504
    GatewayTimeout,
    /// Per-attempt deadline elapsed
    Timeout,
    /// Transport failure
    Network,
}

impl std::fmt::Display for RetryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RetryCondition::BadGateway => "bad gateway (502)",
            RetryCondition::GatewayTimeout => "gateway timeout (504)",
            RetryCondition::Timeout => "request timeout",
            RetryCondition::Network => "network error",
        };
        f.write_str(name)
    }
}

/// Trait for determining if and how an error is retried
pub trait RetryableError {
    /// Returns the retry condition, or `None` if the error is terminal
    fn retry_condition(&self) -> Option<RetryCondition>;

    /// Returns true if the error is retryable
    fn is_retryable(&self) -> bool {
        self.retry_condition().is_some()
    }
}

impl RetryableError for SyncError {
    fn retry_condition(&self) -> Option<RetryCondition> {
        match self {
            SyncError::RetryableHttp { status: 502, .. } => Some(RetryCondition::BadGateway),
            SyncError::RetryableHttp { status: 504, .. } => Some(RetryCondition::GatewayTimeout),
            SyncError::Timeout(_) => Some(RetryCondition::Timeout),
            SyncError::Network(_) => Some(RetryCondition::Network),

            // Only 502/504 are constructed as RetryableHttp
            SyncError::RetryableHttp { .. } => None,
            SyncError::Http { .. } => None,
            SyncError::Unexpected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_messages() {
        assert_eq!(
            SyncError::Http {
                status: 401,
                body: "Invalid JWT".to_string()
            }
            .to_string(),
            "HTTP 401: Invalid JWT"
        );
        assert_eq!(
            SyncError::RetryableHttp {
                status: 502,
                body: "Bad Gateway".to_string()
            }
            .to_string(),
            "HTTP 502: Bad Gateway"
        );
        assert_eq!(
            SyncError::Timeout(Duration::from_secs(30)).to_string(),
            "Request timed out after 30s"
        );
        assert_eq!(
            SyncError::Network("connection reset".to_string()).to_string(),
            "Network error: connection reset"
        );
    }

    #[test]
    fn test_retry_conditions() {
        let bad_gateway = SyncError::RetryableHttp {
            status: 502,
            body: String::new(),
        };
        let gateway_timeout = SyncError::RetryableHttp {
            status: 504,
            body: String::new(),
        };

        assert_eq!(
            bad_gateway.retry_condition(),
            Some(RetryCondition::BadGateway)
        );
        assert_eq!(
            gateway_timeout.retry_condition(),
            Some(RetryCondition::GatewayTimeout)
        );
        assert_eq!(
            SyncError::Timeout(Duration::from_secs(30)).retry_condition(),
            Some(RetryCondition::Timeout)
        );
        assert_eq!(
            SyncError::Network("dns".to_string()).retry_condition(),
            Some(RetryCondition::Network)
        );
    }

    #[test]
    fn test_terminal_errors_are_not_retryable() {
        for status in [400, 401, 403, 404, 500, 503] {
            let err = SyncError::Http {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "HTTP {} must not be retried", status);
        }
        assert!(!SyncError::Unexpected("bad header".to_string()).is_retryable());
    }

    #[test]
    fn test_status_accessor() {
        let err = SyncError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(SyncError::Network("reset".to_string()).status(), None);
    }

    #[test]
    fn test_app_error_from_conversions() {
        let app_err: AppError = ConfigError::MissingRequired("SUPABASE_ANON_KEY".to_string()).into();
        assert_eq!(
            app_err.to_string(),
            "Configuration error: Missing required configuration: SUPABASE_ANON_KEY"
        );

        let app_err: AppError = SyncError::Unexpected("oops".to_string()).into();
        match app_err {
            AppError::Sync(SyncError::Unexpected(msg)) => assert_eq!(msg, "oops"),
            _ => panic!("Expected AppError::Sync(SyncError::Unexpected)"),
        }
    }

    #[test]
    fn test_retry_condition_display() {
        assert_eq!(RetryCondition::BadGateway.to_string(), "bad gateway (502)");
        assert_eq!(
            RetryCondition::GatewayTimeout.to_string(),
            "gateway timeout (504)"
        );
    }
}
