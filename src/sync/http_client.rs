//! HTTP client for the sync Edge Function
//!
//! This module performs a single POST against the function URL, bounded by
//! the per-attempt timeout, and classifies the result into a [`Payload`] or
//! a [`SyncError`].

use crate::config::SupabaseConfig;
use crate::error::SyncError;
use crate::models::Payload;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Request body sent with every invocation
const EMPTY_JSON_BODY: &str = "{}";

/// Client that invokes the sync function once per call
#[derive(Clone)]
pub struct TriggerClient {
    client: Client,
    url: String,
    anon_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for TriggerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerClient")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TriggerClient {
    /// Create a client for the configured function
    pub fn new(supabase: &SupabaseConfig, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SyncError::Unexpected(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(
            client,
            supabase.function_url(),
            supabase.anon_key.clone(),
            timeout,
        ))
    }

    /// Create a client with a custom reqwest Client
    pub fn with_client(
        client: Client,
        url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            anon_key: anon_key.into(),
            timeout,
        }
    }

    /// URL of the function being invoked
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke the function once
    ///
    /// The whole exchange, including reading the body, must finish within the
    /// timeout. When it elapses the in-flight request is dropped.
    pub async fn invoke(&self) -> Result<Payload, SyncError> {
        match tokio::time::timeout(self.timeout, self.send()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    url = %self.url,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Request timed out"
                );
                Err(SyncError::Timeout(self.timeout))
            }
        }
    }

    async fn send(&self) -> Result<Payload, SyncError> {
        let authorization = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|e| SyncError::Unexpected(format!("Invalid authorization header: {}", e)))?;

        debug!(url = %self.url, "Sending HTTP POST request");

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(EMPTY_JSON_BODY)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        // Read the body before checking status so error bodies reach the logs
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!(
            url = %self.url,
            status = status.as_u16(),
            body_size = body.len(),
            "Received response"
        );

        classify_response(status, body)
    }

    fn transport_error(&self, e: reqwest::Error) -> SyncError {
        if e.is_timeout() {
            SyncError::Timeout(self.timeout)
        } else if e.is_connect() || e.is_request() || e.is_body() {
            SyncError::Network(error_chain(&e))
        } else {
            SyncError::Unexpected(error_chain(&e))
        }
    }
}

/// Map a status code and body to the attempt result
pub fn classify_response(status: StatusCode, body: String) -> Result<Payload, SyncError> {
    match status {
        status if status.is_success() => Ok(Payload::from_body(&body)),
        StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => Err(SyncError::RetryableHttp {
            status: status.as_u16(),
            body,
        }),
        status => Err(SyncError::Http {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Render an error with its sources, e.g. "error sending request: connection refused"
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
