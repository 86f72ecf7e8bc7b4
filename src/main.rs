//! One-shot monitor run, intended to be invoked by an external scheduler.

use mining_monitor::{
    ConfigProvider, EnvConfigProvider, FileConfigProvider, MiningMonitor, RunError,
};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<mining_monitor::MonitorConfig, RunError> {
    // MONITOR_CONFIG selects the file provider; env vars otherwise.
    let config = match std::env::var("MONITOR_CONFIG") {
        Ok(path) => FileConfigProvider::new(path).load()?,
        Err(_) => EnvConfigProvider.load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Run failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RunError> {
    let config = load_config()?;
    let monitor = MiningMonitor::new(config)?;
    let outcome = monitor.run_once().await?;
    tracing::info!(outcome = ?outcome, "Run complete");
    Ok(())
}
