//! Gasnow oracle fetcher

use crate::{
    constants::{GASNOW_API_URL, REQUEST_TIMEOUT_SECS, USER_AGENT, WEI_PER_GWEI},
    error::FetchError,
    fetcher::GasPriceFetcher,
    rounding::round_sig,
    types::{GasPrices, GasValue},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Gasnow API response envelope
#[derive(Debug, Deserialize)]
struct GasnowResponse {
    data: GasnowData,
}

/// Gas tiers in wei
#[derive(Debug, Deserialize)]
struct GasnowData {
    rapid: f64,
    fast: f64,
    standard: f64,
    slow: f64,
}

/// Fetches gas price tiers from the Gasnow oracle
pub struct GasnowClient {
    client: Client,
    /// Significant digits for the normalized gwei values
    precision: u32,
}

impl GasnowClient {
    /// Creates a new Gasnow client
    pub fn new(precision: u32) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client, precision })
    }
}

/// Converts wei tiers to gwei at the configured significant-digit precision
fn normalize(data: &GasnowData, precision: u32) -> GasPrices {
    let to_gwei = |wei: f64| GasValue::Gwei(round_sig(wei / WEI_PER_GWEI, precision));
    GasPrices {
        rapid: to_gwei(data.rapid),
        fast: to_gwei(data.fast),
        standard: to_gwei(data.standard),
        slow: to_gwei(data.slow),
    }
}

#[async_trait]
impl GasPriceFetcher for GasnowClient {
    async fn fetch_gas_prices(&self) -> Result<GasPrices, FetchError> {
        tracing::debug!(url = GASNOW_API_URL, "Fetching gas prices from Gasnow");

        let response = self
            .client
            .get(GASNOW_API_URL)
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

        let parsed: GasnowResponse = serde_json::from_str(&response_text).map_err(|e| {
            FetchError::InvalidResponse(format!(
                "Failed to parse Gasnow response: {}. Response: {}",
                e, response_text
            ))
        })?;

        Ok(normalize(&parsed.data, self.precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_wei_to_gwei_at_three_sig_figs() {
        let data = GasnowData {
            rapid: 193_200_000_000.0,
            fast: 154_780_000_000.0,
            standard: 85_440_000_000.0,
            slow: 70_000_000_000.0,
        };
        let gas = normalize(&data, 3);
        assert_eq!(gas.rapid, GasValue::Gwei(193.0));
        assert_eq!(gas.fast, GasValue::Gwei(155.0));
        assert_eq!(gas.standard, GasValue::Gwei(85.4));
        assert_eq!(gas.slow, GasValue::Gwei(70.0));
        assert!(!gas.is_degraded());
    }

    #[test]
    fn honors_two_sig_fig_precision() {
        let data = GasnowData {
            rapid: 193_200_000_000.0,
            fast: 154_780_000_000.0,
            standard: 85_440_000_000.0,
            slow: 70_000_000_000.0,
        };
        let gas = normalize(&data, 2);
        assert_eq!(gas.rapid, GasValue::Gwei(190.0));
        assert_eq!(gas.standard, GasValue::Gwei(85.0));
    }

    #[test]
    fn parses_oracle_payload() {
        let body = r#"{"code": 200, "data": {"rapid": 100000000000, "fast": 90000000000, "standard": 80000000000, "slow": 70000000000}}"#;
        let parsed: GasnowResponse = serde_json::from_str(body).unwrap();
        let gas = normalize(&parsed.data, 3);
        assert_eq!(gas.rapid, GasValue::Gwei(100.0));
        assert_eq!(gas.slow, GasValue::Gwei(70.0));
    }
}
