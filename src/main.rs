//! kds-sync-trigger - Scheduled trigger for the KDS to Airtable sync
//!
//! This is the entry point invoked by the external scheduler.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use kds_sync_trigger::config::Config;
use kds_sync_trigger::logging::init_tracing;
use kds_sync_trigger::sync::trigger;

/// kds-sync-trigger - Scheduled trigger for the KDS to Airtable sync
#[derive(Parser, Debug)]
#[command(name = "kds-sync-trigger")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file (defaults to environment variables)
    #[arg(short, long, env = "KDS_SYNC_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(&args)?;

    init_tracing(&config.logging)?;

    let started = Instant::now();
    let outcome = trigger::run(&config).await;

    info!(
        success = outcome.is_success(),
        attempts = outcome.attempts(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        exit_code = outcome.exit_code(),
        "Process completed"
    );

    Ok(ExitCode::from(outcome.exit_code()))
}

/// Load configuration from file or environment
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from file: {}", path);
            Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
        None => Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e)),
    }
}
