//! # Mining Monitor
//!
//! Polls a mining pool dashboard, a gas price oracle, and a wallet explorer,
//! computes progress deltas against a rolling CSV history, and posts a
//! formatted summary to a Discord-style webhook.
//!
//! ## Usage
//!
//! One call to [`MiningMonitor::run_once`] is one observation cycle; an
//! external scheduler (cron, a systemd timer) drives repeated runs:
//!
//! ```no_run
//! use mining_monitor::{ConfigProvider, EnvConfigProvider, MiningMonitor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EnvConfigProvider.load()?;
//! let monitor = MiningMonitor::new(config)?;
//! let outcome = monitor.run_once().await?;
//! println!("run finished: {:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure policy
//!
//! The pool and wallet fetchers fail hard: any error aborts the run with no
//! report and no history write. The gas oracle alone fails soft: its four
//! tiers are replaced with an explicit `error` marker and the run continues
//! with a degraded report. See [`types::FetcherKind::failure_policy`].

pub mod config;
pub mod constants;
pub mod delta;
pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod history;
pub mod monitor;
pub mod notifier;
pub mod report;
pub mod rounding;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigProvider, EnvConfigProvider, FileConfigProvider, MonitorConfig};
pub use error::{ConfigError, FetchError, HistoryError, NotifyError, RunError};
pub use history::{CsvHistoryStore, HistoryRecord, HistoryStore};
pub use monitor::{MiningMonitor, RunOutcome};
pub use types::{
    DeltaResult, FailurePolicy, FetcherKind, GasPrices, GasValue, MetricSample, MiningStats,
    WalletBalance,
};
