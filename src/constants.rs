//! Constants for the mining monitor
//!
//! Endpoint URLs and normalization scales live here; everything that is
//! deployment-specific (wallet, webhook, share count) comes from
//! [`crate::config::MonitorConfig`] instead.

/// Ethermine API base URL
pub const ETHERMINE_API_URL: &str = "https://api.ethermine.org";

/// Ethermine miner dashboard endpoint (append `/{wallet}/dashboard`)
pub const ETHERMINE_MINER_ENDPOINT: &str = "/miner";

/// Public dashboard URL linked from the report embed
pub const ETHERMINE_DASHBOARD_URL: &str = "https://ethermine.org/miners";

/// Gasnow oracle endpoint (no parameters)
pub const GASNOW_API_URL: &str = "https://etherchain.org/api/gasnow";

/// Ethplorer address-info endpoint (append `/{wallet}?apiKey={key}`)
pub const ETHPLORER_API_URL: &str = "https://api.ethplorer.io/getAddressInfo";

/// Wei per ETH (10^18)
pub const WEI_PER_ETH: f64 = 1e18;

/// Wei per gwei (10^9)
pub const WEI_PER_GWEI: f64 = 1e9;

/// Hashes per megahash
pub const HASHES_PER_MEGAHASH: f64 = 1e6;

/// Pool payout threshold in wei (0.2 ETH). Unpaid balance is reported as a
/// percentage of this threshold.
pub const PAYOUT_THRESHOLD_WEI: f64 = 2e17;

/// HTTP request timeout when fetching metrics (in seconds)
///
/// The original service had no timeout at all; this is a defensive addition
/// so a stalled endpoint cannot wedge a scheduled run forever.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "mining-monitor/0.1.0";

/// Name the webhook message posts under
pub const WEBHOOK_USERNAME: &str = "Choochbot Premium";

/// Title of the report embed
pub const REPORT_TITLE: &str = "Ethermine Dashboard";

/// Default number of participants splitting the wallet balance
pub const DEFAULT_SHARE_COUNT: u32 = 3;

/// Default history file path
pub const DEFAULT_HISTORY_PATH: &str = "historicaldata.csv";

/// Default maximum number of history rows kept (FIFO bound)
pub const DEFAULT_HISTORY_MAX_LEN: usize = 1000;

/// Default Ethplorer API key (public free tier)
pub const DEFAULT_ETHPLORER_API_KEY: &str = "freekey";

/// Default significant digits for gas price display
pub const DEFAULT_GAS_PRECISION: u32 = 3;
