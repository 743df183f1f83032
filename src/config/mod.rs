//! Configuration management for kds-sync-trigger
//!
//! Configuration is read once at startup, either from environment variables
//! (the default) or from a YAML file with `${VAR}` expansion.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::RetryCondition;

/// Environment variable holding the Supabase project identifier
pub const ENV_PROJECT_ID: &str = "SUPABASE_PROJECT_ID";
/// Environment variable holding the bearer credential
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Optional base URL override
pub const ENV_BASE_URL: &str = "SUPABASE_URL";
/// Optional function path override
pub const ENV_FUNCTION: &str = "KDS_SYNC_FUNCTION";
/// Optional log level
pub const ENV_LOG_LEVEL: &str = "KDS_SYNC_LOG_LEVEL";
/// Optional log format
pub const ENV_LOG_FORMAT: &str = "KDS_SYNC_LOG_FORMAT";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Supabase Edge Function target
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// Retry and timeout policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(yaml);
        serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse YAML: {}", e)))
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Missing credentials are not an error here; call [`Config::validate`]
    /// before using the result.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(project_id) = lookup(ENV_PROJECT_ID) {
            config.supabase.project_id = project_id;
        }
        if let Some(anon_key) = lookup(ENV_ANON_KEY) {
            config.supabase.anon_key = anon_key;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.supabase.base_url = Some(base_url);
        }
        if let Some(function) = lookup(ENV_FUNCTION).filter(|v| !v.trim().is_empty()) {
            config.supabase.function = function;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Check that required values are present
    ///
    /// Both credentials must be present and non-blank; nothing else is required.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.supabase.project_id.trim().is_empty() {
            missing.push(ENV_PROJECT_ID);
        }
        if self.supabase.anon_key.trim().is_empty() {
            missing.push(ENV_ANON_KEY);
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing.join(", ")));
        }

        if self.supabase.function.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "supabase.function must not be empty".to_string(),
            ));
        }
        if self.retry.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "retry.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Supabase Edge Function target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupabaseConfig {
    /// Project identifier, interpolated into the host name
    #[serde(default)]
    pub project_id: String,

    /// Bearer credential
    #[serde(default)]
    pub anon_key: String,

    /// Host suffix appended to the project identifier
    #[serde(default = "default_host_suffix")]
    pub host_suffix: String,

    /// Edge Function name
    #[serde(default = "default_function")]
    pub function: String,

    /// Full base URL replacing `https://<project>.<suffix>`
    #[serde(default)]
    pub base_url: Option<String>,
}

impl SupabaseConfig {
    /// URL of the Edge Function to invoke
    pub fn function_url(&self) -> String {
        let base = match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("https://{}.{}", self.project_id, self.host_suffix),
        };
        format!("{}/functions/v1/{}", base, self.function)
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            anon_key: String::new(),
            host_suffix: default_host_suffix(),
            function: default_function(),
            base_url: None,
        }
    }
}

fn default_host_suffix() -> String {
    "supabase.co".to_string()
}

fn default_function() -> String {
    "sync-kds-to-airtable".to_string()
}

/// Retry and timeout policy for the trigger call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay after HTTP 502
    #[serde(default = "default_bad_gateway_delay")]
    pub bad_gateway_delay_secs: u64,

    /// Delay after HTTP 504
    #[serde(default = "default_gateway_timeout_delay")]
    pub gateway_timeout_delay_secs: u64,

    /// Delay after an attempt timed out
    #[serde(default = "default_timeout_delay")]
    pub timeout_delay_secs: u64,

    /// Delay after a network failure
    #[serde(default = "default_network_delay")]
    pub network_delay_secs: u64,
}

impl RetryConfig {
    /// Fixed delay for a retry condition
    pub fn delay_for(&self, condition: RetryCondition) -> Duration {
        let secs = match condition {
            RetryCondition::BadGateway => self.bad_gateway_delay_secs,
            RetryCondition::GatewayTimeout => self.gateway_timeout_delay_secs,
            RetryCondition::Timeout => self.timeout_delay_secs,
            RetryCondition::Network => self.network_delay_secs,
        };
        Duration::from_secs(secs)
    }

    /// Per-attempt timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Total number of attempts allowed, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout(),
            bad_gateway_delay_secs: default_bad_gateway_delay(),
            gateway_timeout_delay_secs: default_gateway_timeout_delay(),
            timeout_delay_secs: default_timeout_delay(),
            network_delay_secs: default_network_delay(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    30
}

fn default_bad_gateway_delay() -> u64 {
    5
}

fn default_gateway_timeout_delay() -> u64 {
    10
}

fn default_timeout_delay() -> u64 {
    5
}

fn default_network_delay() -> u64 {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (`json` or `pretty`)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Configuration error types
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Error reading configuration file
    #[error("Failed to read configuration file: {0}")]
    FileRead(String),

    /// Error parsing configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

/// Expand environment variables in a string
///
/// Supports `${VAR_NAME}` syntax. Unset variables expand to an empty string,
/// so a credential taken from a missing variable fails validation.
fn expand_env_vars(input: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .expect("Invalid regex pattern for environment variable expansion");

    re.replace_all(input, |caps: &regex_lite::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_default()
    })
    .into_owned()
}
