//! Domain models for kds-sync-trigger
//!
//! This module contains the response payload and run outcome types.

pub mod outcome;
pub mod payload;

// Re-export commonly used types
pub use outcome::{Outcome, EXIT_CONFIGURATION_ERROR, EXIT_SUCCESS};
pub use payload::Payload;
