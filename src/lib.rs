//! kds-sync-trigger - Scheduled trigger for the KDS to Airtable sync
//!
//! This crate invokes the `sync-kds-to-airtable` Supabase Edge Function once
//! per run, retrying gateway errors, timeouts and network failures with fixed
//! per-condition delays. The synchronization itself happens in the function.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sync;
