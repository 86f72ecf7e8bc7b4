//! Fetcher abstractions for the three external metric sources
//!
//! Each source gets its own seam so tests can substitute canned data or
//! failures without touching the network. Concrete HTTP clients live in
//! [`crate::fetchers`].

use crate::error::FetchError;
use crate::types::{GasPrices, MiningStats, WalletBalance};
use async_trait::async_trait;

/// Fetches current pool statistics for a wallet
#[async_trait]
pub trait MiningStatsFetcher: Send + Sync {
    /// Fetches and normalizes the pool dashboard statistics
    ///
    /// # Arguments
    /// * `wallet` - The mining wallet address
    async fn fetch_mining_stats(&self, wallet: &str) -> Result<MiningStats, FetchError>;
}

/// Fetches current gas price tiers
#[async_trait]
pub trait GasPriceFetcher: Send + Sync {
    /// Fetches and normalizes the four gas tiers
    async fn fetch_gas_prices(&self) -> Result<GasPrices, FetchError>;
}

/// Fetches the wallet balance and ETH/USD rate
#[async_trait]
pub trait WalletBalanceFetcher: Send + Sync {
    /// Fetches the wallet balance and derives the USD values
    ///
    /// # Arguments
    /// * `wallet` - The wallet address
    async fn fetch_wallet_balance(&self, wallet: &str) -> Result<WalletBalance, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::types::GasValue;
    use std::sync::Mutex;

    /// Mock mining stats fetcher returning canned data or a failure
    pub struct MockMiningStats {
        response: Result<MiningStats, String>,
        calls: Mutex<usize>,
    }

    impl MockMiningStats {
        pub fn ok(stats: MiningStats) -> Self {
            Self {
                response: Ok(stats),
                calls: Mutex::new(0),
            }
        }

        pub fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
                calls: Mutex::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MiningStatsFetcher for MockMiningStats {
        async fn fetch_mining_stats(&self, _wallet: &str) -> Result<MiningStats, FetchError> {
            *self.calls.lock().unwrap() += 1;
            self.response.clone().map_err(FetchError::Api)
        }
    }

    /// Mock gas price fetcher
    pub struct MockGasPrices {
        response: Result<GasPrices, String>,
    }

    impl MockGasPrices {
        pub fn ok(gas: GasPrices) -> Self {
            Self { response: Ok(gas) }
        }

        pub fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
            }
        }

        pub fn flat(gwei: f64) -> Self {
            Self::ok(GasPrices {
                rapid: GasValue::Gwei(gwei),
                fast: GasValue::Gwei(gwei),
                standard: GasValue::Gwei(gwei),
                slow: GasValue::Gwei(gwei),
            })
        }
    }

    #[async_trait]
    impl GasPriceFetcher for MockGasPrices {
        async fn fetch_gas_prices(&self) -> Result<GasPrices, FetchError> {
            self.response.clone().map_err(FetchError::Api)
        }
    }

    /// Mock wallet balance fetcher
    pub struct MockWalletBalance {
        response: Result<WalletBalance, String>,
        calls: Mutex<usize>,
    }

    impl MockWalletBalance {
        pub fn ok(balance: WalletBalance) -> Self {
            Self {
                response: Ok(balance),
                calls: Mutex::new(0),
            }
        }

        pub fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
                calls: Mutex::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl WalletBalanceFetcher for MockWalletBalance {
        async fn fetch_wallet_balance(&self, _wallet: &str) -> Result<WalletBalance, FetchError> {
            *self.calls.lock().unwrap() += 1;
            self.response.clone().map_err(FetchError::Api)
        }
    }
}
