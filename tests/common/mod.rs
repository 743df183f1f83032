//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kds_sync_trigger::config::{Config, RetryConfig, SupabaseConfig};
use kds_sync_trigger::sync::Sleeper;
use wiremock::MockServer;

/// Path of the sync function on the mock server
pub const FUNCTION_PATH: &str = "/functions/v1/sync-kds-to-airtable";

/// Records requested retry delays instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("sleeper lock poisoned").clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
    }
}

/// Configuration pointing at the mock server with production retry policy
pub fn test_config(server: &MockServer) -> Config {
    Config {
        supabase: SupabaseConfig {
            project_id: "testproject".to_string(),
            anon_key: "test-anon-key".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        },
        retry: RetryConfig::default(),
        ..Default::default()
    }
}

/// Number of requests the mock server has received
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
