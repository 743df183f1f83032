//! Result of one trigger run

use crate::config::ConfigError;
use crate::error::SyncError;

use super::Payload;

/// Exit code for any run that got past configuration
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when required configuration is missing
pub const EXIT_CONFIGURATION_ERROR: u8 = 1;

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The function answered with a 2xx status
    Success { payload: Payload, attempts: u32 },

    /// Retries exhausted or a terminal error was hit
    Failed { error: SyncError, attempts: u32 },

    /// Pre-flight configuration check failed; nothing was sent
    ConfigurationError(ConfigError),
}

impl Outcome {
    /// Number of attempts made
    pub fn attempts(&self) -> u32 {
        match self {
            Outcome::Success { attempts, .. } | Outcome::Failed { attempts, .. } => *attempts,
            Outcome::ConfigurationError(_) => 0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Process exit code for this outcome
    ///
    /// Failed runs still exit 0: the scheduler fires again in 15 minutes and
    /// the attempt loop already retried. Only a deployment defect exits non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success { .. } | Outcome::Failed { .. } => EXIT_SUCCESS,
            Outcome::ConfigurationError(_) => EXIT_CONFIGURATION_ERROR,
        }
    }
}
