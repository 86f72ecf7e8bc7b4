//! Ethermine pool dashboard fetcher

use crate::{
    constants::{
        ETHERMINE_API_URL, ETHERMINE_MINER_ENDPOINT, HASHES_PER_MEGAHASH, PAYOUT_THRESHOLD_WEI,
        REQUEST_TIMEOUT_SECS, USER_AGENT, WEI_PER_ETH,
    },
    error::FetchError,
    fetcher::MiningStatsFetcher,
    rounding::round_dp,
    types::MiningStats,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Ethermine dashboard API response envelope
#[derive(Debug, Deserialize)]
struct EthermineResponse {
    data: EthermineData,
}

#[derive(Debug, Deserialize)]
struct EthermineData {
    #[serde(rename = "currentStatistics")]
    current_statistics: CurrentStatistics,
}

/// The slice of the dashboard payload the monitor cares about
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentStatistics {
    active_workers: u64,
    /// Hashrate in raw hashes per second
    current_hashrate: f64,
    /// Unpaid balance in wei
    unpaid: f64,
}

/// Fetches miner statistics from the Ethermine dashboard API
pub struct EthermineClient {
    client: Client,
}

impl EthermineClient {
    /// Creates a new Ethermine client
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }

    fn build_url(&self, wallet: &str) -> String {
        format!(
            "{}{}/{}/dashboard",
            ETHERMINE_API_URL, ETHERMINE_MINER_ENDPOINT, wallet
        )
    }
}

/// Normalizes raw dashboard statistics into display-scale values
fn normalize(stats: &CurrentStatistics) -> MiningStats {
    MiningStats {
        active_workers: stats.active_workers,
        hashrate_mhs: round_dp(stats.current_hashrate / HASHES_PER_MEGAHASH, 2),
        unpaid_progress_pct: round_dp(stats.unpaid / (PAYOUT_THRESHOLD_WEI / 100.0), 2),
        unpaid_progress_eth: round_dp(stats.unpaid / WEI_PER_ETH, 5),
    }
}

#[async_trait]
impl MiningStatsFetcher for EthermineClient {
    async fn fetch_mining_stats(&self, wallet: &str) -> Result<MiningStats, FetchError> {
        let url = self.build_url(wallet);
        tracing::debug!(url = %url, "Fetching mining stats from Ethermine");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let response_text = response.text().await.map_err(FetchError::Network)?;

        let parsed: EthermineResponse = serde_json::from_str(&response_text).map_err(|e| {
            FetchError::InvalidResponse(format!(
                "Failed to parse Ethermine response: {}. Response: {}",
                e, response_text
            ))
        })?;

        Ok(normalize(&parsed.data.current_statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_hashrate_to_two_decimals() {
        let stats = CurrentStatistics {
            active_workers: 4,
            current_hashrate: 123_456_789.0,
            unpaid: 0.0,
        };
        let normalized = normalize(&stats);
        assert_eq!(normalized.hashrate_mhs, 123.46);
        assert_eq!(normalized.active_workers, 4);
    }

    #[test]
    fn unpaid_scales_to_percent_and_eth() {
        // 0.1 ETH unpaid against a 0.2 ETH threshold
        let stats = CurrentStatistics {
            active_workers: 1,
            current_hashrate: 0.0,
            unpaid: 1e17,
        };
        let normalized = normalize(&stats);
        assert_eq!(normalized.unpaid_progress_pct, 50.0);
        assert_eq!(normalized.unpaid_progress_eth, 0.1);
    }

    #[test]
    fn parses_dashboard_payload() {
        let body = r#"{
            "status": "OK",
            "data": {
                "currentStatistics": {
                    "activeWorkers": 2,
                    "currentHashrate": 90000000,
                    "unpaid": 24600000000000000
                }
            }
        }"#;
        let parsed: EthermineResponse = serde_json::from_str(body).unwrap();
        let normalized = normalize(&parsed.data.current_statistics);
        assert_eq!(normalized.hashrate_mhs, 90.0);
        assert_eq!(normalized.unpaid_progress_pct, 12.3);
        assert_eq!(normalized.unpaid_progress_eth, 0.0246);
    }
}
