//! Runtime configuration for the monitor
//!
//! One [`ConfigProvider`] capability with two implementations: environment
//! variables (the stateless deployment) and a JSON config file (the
//! deployment that also keeps CSV history). The binary picks one at startup;
//! everything downstream only sees [`MonitorConfig`].

use crate::constants::{
    DEFAULT_ETHPLORER_API_KEY, DEFAULT_GAS_PRECISION, DEFAULT_HISTORY_MAX_LEN,
    DEFAULT_HISTORY_PATH, DEFAULT_SHARE_COUNT,
};
use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Validated monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Mining wallet address, required
    pub wallet: String,
    /// Webhook URL the report is posted to, required
    pub webhook_url: String,
    /// Number of participants splitting the wallet balance
    pub share_count: u32,
    /// History file path; `None` disables history and delta computation
    pub history_path: Option<PathBuf>,
    /// Maximum history rows kept before FIFO eviction
    pub history_max_len: usize,
    /// Ethplorer API key
    pub ethplorer_api_key: String,
    /// Significant digits for gas display, clamped to 2..=3
    pub gas_precision: u32,
}

/// Unvalidated configuration as read from the environment or a file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    pub wallet: Option<String>,
    pub webhook_url: Option<String>,
    pub share_count: Option<u32>,
    pub history_path: Option<PathBuf>,
    pub history_enabled: Option<bool>,
    pub history_max_len: Option<usize>,
    pub ethplorer_api_key: Option<String>,
    pub gas_precision: Option<u32>,
}

impl MonitorConfig {
    /// Validates a raw config, filling in defaults
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let wallet = raw
            .wallet
            .filter(|w| !w.is_empty())
            .ok_or(ConfigError::Missing("wallet"))?;
        let webhook_url = raw
            .webhook_url
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing("webhook_url"))?;

        let share_count = raw.share_count.unwrap_or(DEFAULT_SHARE_COUNT);
        if share_count == 0 {
            return Err(ConfigError::Invalid {
                key: "share_count",
                reason: "must be a positive integer".to_string(),
            });
        }

        let history_max_len = raw.history_max_len.unwrap_or(DEFAULT_HISTORY_MAX_LEN);
        if history_max_len == 0 {
            return Err(ConfigError::Invalid {
                key: "history_max_len",
                reason: "must be a positive integer".to_string(),
            });
        }

        // History defaults on; an explicit `history_enabled: false` turns it
        // off even when a path is present.
        let history_path = if raw.history_enabled.unwrap_or(true) {
            Some(
                raw.history_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
            )
        } else {
            None
        };

        let gas_precision = raw
            .gas_precision
            .unwrap_or(DEFAULT_GAS_PRECISION)
            .clamp(2, 3);

        Ok(Self {
            wallet,
            webhook_url,
            share_count,
            history_path,
            history_max_len,
            ethplorer_api_key: raw
                .ethplorer_api_key
                .unwrap_or_else(|| DEFAULT_ETHPLORER_API_KEY.to_string()),
            gas_precision,
        })
    }
}

/// Source of monitor configuration, selected once at startup
pub trait ConfigProvider {
    /// Loads and validates the configuration
    fn load(&self) -> Result<MonitorConfig, ConfigError>;
}

/// Reads configuration from environment variables
///
/// `WALLET` and `WEBHOOK_URL` (legacy alias `ENDPOINT`) are required;
/// `SHARE_COUNT`, `HISTORY_PATH`, `HISTORY_MAX_LEN`, `NO_HISTORY`,
/// `ETHPLORER_API_KEY`, and `GAS_PRECISION` are optional.
#[derive(Debug, Default)]
pub struct EnvConfigProvider;

impl EnvConfigProvider {
    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn parsed_var<T: std::str::FromStr>(
        name: &'static str,
        key: &'static str,
    ) -> Result<Option<T>, ConfigError>
    where
        T::Err: std::fmt::Display,
    {
        match Self::var(name) {
            None => Ok(None),
            Some(v) => v.parse().map(Some).map_err(|e| ConfigError::Invalid {
                key,
                reason: format!("{}", e),
            }),
        }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let raw = RawConfig {
            wallet: Self::var("WALLET"),
            webhook_url: Self::var("WEBHOOK_URL").or_else(|| Self::var("ENDPOINT")),
            share_count: Self::parsed_var("SHARE_COUNT", "share_count")?,
            history_path: Self::var("HISTORY_PATH").map(PathBuf::from),
            history_enabled: Some(Self::var("NO_HISTORY").is_none()),
            history_max_len: Self::parsed_var("HISTORY_MAX_LEN", "history_max_len")?,
            ethplorer_api_key: Self::var("ETHPLORER_API_KEY"),
            gas_precision: Self::parsed_var("GAS_PRECISION", "gas_precision")?,
        };
        MonitorConfig::from_raw(raw)
    }
}

/// Reads configuration from a JSON file
#[derive(Debug)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let contents = std::fs::read_to_string(&self.path)?;
        let raw: RawConfig = serde_json::from_str(&contents)?;
        MonitorConfig::from_raw(raw)
    }
}
