//! Types for the mining monitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three external metric sources polled each run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetcherKind {
    /// Mining pool dashboard statistics
    MiningStats,
    /// Gas price oracle
    GasPrice,
    /// Wallet balance and ETH/USD rate
    WalletBalance,
}

/// What a run does when a fetcher fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the run; no report is sent and no history is written
    HardFail,
    /// Substitute an explicit error marker and continue the run
    SoftFailWithMarker,
}

impl FetcherKind {
    /// Get the fetcher name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            FetcherKind::MiningStats => "mining_stats",
            FetcherKind::GasPrice => "gas_price",
            FetcherKind::WalletBalance => "wallet_balance",
        }
    }

    /// Get the failure policy for this fetcher
    ///
    /// Only the gas oracle fails soft: a missing gas reading still produces
    /// a useful report, while missing pool or wallet data does not.
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            FetcherKind::MiningStats => FailurePolicy::HardFail,
            FetcherKind::GasPrice => FailurePolicy::SoftFailWithMarker,
            FetcherKind::WalletBalance => FailurePolicy::HardFail,
        }
    }

    /// Get all fetchers in the order they are polled
    pub fn all() -> &'static [FetcherKind] {
        &[
            FetcherKind::MiningStats,
            FetcherKind::GasPrice,
            FetcherKind::WalletBalance,
        ]
    }
}

/// Normalized mining pool statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningStats {
    /// Workers currently reporting to the pool
    pub active_workers: u64,
    /// Current hashrate in MH/s, rounded to 2 decimals
    pub hashrate_mhs: f64,
    /// Unpaid balance as a percentage of the payout threshold, 2 decimals
    pub unpaid_progress_pct: f64,
    /// Unpaid balance in ETH, 5 decimals
    pub unpaid_progress_eth: f64,
}

/// One gas price tier: either a gwei reading or an explicit error marker
///
/// The marker is deliberate: a failed oracle renders as `error` in the
/// report instead of being dropped or zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GasValue {
    /// Price in gwei, rounded to the configured significant digits
    Gwei(f64),
    /// Fetch failed; renders as `error`
    Error,
}

impl fmt::Display for GasValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasValue::Gwei(v) => {
                if *v == v.trunc() {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            GasValue::Error => write!(f, "error"),
        }
    }
}

/// Gas price tiers in descending inclusion-speed order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPrices {
    pub rapid: GasValue,
    pub fast: GasValue,
    pub standard: GasValue,
    pub slow: GasValue,
}

impl GasPrices {
    /// All four tiers set to the error marker
    pub fn unavailable() -> Self {
        Self {
            rapid: GasValue::Error,
            fast: GasValue::Error,
            standard: GasValue::Error,
            slow: GasValue::Error,
        }
    }

    /// True if any tier carries the error marker
    pub fn is_degraded(&self) -> bool {
        [self.rapid, self.fast, self.standard, self.slow]
            .iter()
            .any(|v| matches!(v, GasValue::Error))
    }
}

/// Normalized wallet balance and derived USD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Wallet balance in ETH, 5 decimals
    pub balance_eth: f64,
    /// ETH/USD rate, 2 decimals
    pub eth_usd_price: f64,
    /// balance_eth x eth_usd_price, 2 decimals
    pub balance_usd: f64,
    /// balance_usd split across the configured share count, 2 decimals
    pub share_payout_usd: f64,
}

/// One complete observation cycle
///
/// Built once per run and never mutated afterwards; every later stage
/// (delta, history, report) borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    pub mining: MiningStats,
    pub gas: GasPrices,
    pub wallet: WalletBalance,
}

impl MetricSample {
    /// Assembles a sample from the three fetcher outputs
    pub fn new(mining: MiningStats, gas: GasPrices, wallet: WalletBalance) -> Self {
        Self {
            timestamp: Utc::now(),
            mining,
            gas,
            wallet,
        }
    }
}

/// Period-over-period progress changes, both at 1 significant digit
///
/// `progress_delta_of_delta` is a second difference: the change of the
/// change, computed against the delta stored with the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaResult {
    /// Progress percentage gained since the previous run
    pub progress_delta_pct: f64,
    /// Change in that gain relative to the previous run's gain
    pub progress_delta_of_delta: f64,
}
