//! Error types for the mining monitor

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value is absent
    #[error("Missing required config value: {0}")]
    Missing(&'static str),

    /// A value is present but unusable
    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur when fetching metrics from an external API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while reading or writing the history file
#[derive(Debug, Error)]
pub enum HistoryError {
    /// File could not be read or written
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row could not be parsed or serialized
    #[error("History CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur when delivering the report
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Webhook returned a non-success status
    #[error("Webhook rejected report: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Top-level error for a monitor run
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration was incomplete; no network call was made
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A hard-failing fetcher failed; no report was sent and no history
    /// was written
    #[error("Fetch failed for {fetcher}: {source}")]
    Fetch {
        fetcher: &'static str,
        #[source]
        source: FetchError,
    },

    /// History file could not be read or updated
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Report could not be delivered
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
