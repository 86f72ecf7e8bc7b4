//! Ethplorer wallet balance fetcher

use crate::{
    constants::{ETHPLORER_API_URL, REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::FetchError,
    fetcher::WalletBalanceFetcher,
    rounding::round_dp,
    types::WalletBalance,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Ethplorer address-info response, reduced to the ETH section
#[derive(Debug, Deserialize)]
struct EthplorerResponse {
    #[serde(rename = "ETH")]
    eth: EthSection,
}

#[derive(Debug, Deserialize)]
struct EthSection {
    /// Balance in ETH (not wei)
    balance: f64,
    price: EthPrice,
}

#[derive(Debug, Deserialize)]
struct EthPrice {
    /// ETH/USD rate
    rate: f64,
}

/// Fetches wallet balance and the ETH/USD rate from Ethplorer
pub struct EthplorerClient {
    client: Client,
    api_key: String,
    /// Number of participants the USD balance is split across
    share_count: u32,
}

impl EthplorerClient {
    /// Creates a new Ethplorer client
    pub fn new(api_key: String, share_count: u32) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            api_key,
            share_count,
        })
    }

    fn build_url(&self, wallet: &str) -> String {
        format!("{}/{}?apiKey={}", ETHPLORER_API_URL, wallet, self.api_key)
    }
}

/// Rounds the raw balance and rate, then derives the USD values from the
/// already-rounded inputs. The derivation order matters for cent-level
/// agreement with the displayed ETH amount.
fn normalize(eth: &EthSection, share_count: u32) -> WalletBalance {
    let balance_eth = round_dp(eth.balance, 5);
    let eth_usd_price = round_dp(eth.price.rate, 2);
    let balance_usd = round_dp(balance_eth * eth_usd_price, 2);
    let share_payout_usd = round_dp(balance_usd / share_count as f64, 2);

    WalletBalance {
        balance_eth,
        eth_usd_price,
        balance_usd,
        share_payout_usd,
    }
}

#[async_trait]
impl WalletBalanceFetcher for EthplorerClient {
    async fn fetch_wallet_balance(&self, wallet: &str) -> Result<WalletBalance, FetchError> {
        tracing::debug!(wallet = %wallet, "Fetching wallet balance from Ethplorer");

        let response = self
            .client
            .get(self.build_url(wallet))
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

        let parsed: EthplorerResponse = serde_json::from_str(&response_text).map_err(|e| {
            FetchError::InvalidResponse(format!(
                "Failed to parse Ethplorer response: {}. Response: {}",
                e, response_text
            ))
        })?;

        Ok(normalize(&parsed.eth, self.share_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_usd_values_from_rounded_inputs() {
        let eth = EthSection {
            balance: 1.23456,
            price: EthPrice { rate: 2000.0 },
        };
        let balance = normalize(&eth, 3);
        assert_eq!(balance.balance_eth, 1.23456);
        assert_eq!(balance.eth_usd_price, 2000.0);
        assert_eq!(balance.balance_usd, 2469.12);
        assert_eq!(balance.share_payout_usd, 823.04);
    }

    #[test]
    fn rounds_balance_to_five_decimals_before_deriving() {
        let eth = EthSection {
            balance: 0.123456789,
            price: EthPrice { rate: 1999.999 },
        };
        let balance = normalize(&eth, 5);
        assert_eq!(balance.balance_eth, 0.12346);
        assert_eq!(balance.eth_usd_price, 2000.0);
        assert_eq!(balance.balance_usd, 246.92);
        assert_eq!(balance.share_payout_usd, 49.38);
    }

    #[test]
    fn parses_address_info_payload() {
        let body = r#"{"address": "0xabc", "ETH": {"balance": 2.5, "price": {"rate": 1800.55}}}"#;
        let parsed: EthplorerResponse = serde_json::from_str(body).unwrap();
        let balance = normalize(&parsed.eth, 5);
        assert_eq!(balance.balance_eth, 2.5);
        assert_eq!(balance.balance_usd, 4501.38);
        assert_eq!(balance.share_payout_usd, 900.28);
    }
}
