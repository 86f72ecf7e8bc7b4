//! Run orchestration
//!
//! One [`MiningMonitor::run_once`] call is one observation cycle:
//! fetch the three metric sources sequentially, diff against the last
//! history record, persist the new record, compose the report, and post it
//! to the webhook. An external scheduler drives repeated runs.

use crate::{
    config::MonitorConfig,
    delta::compute_delta,
    error::RunError,
    fetcher::{GasPriceFetcher, MiningStatsFetcher, WalletBalanceFetcher},
    fetchers::{EthermineClient, EthplorerClient, GasnowClient},
    history::{CsvHistoryStore, HistoryRecord, HistoryStore},
    notifier::{ReportNotifier, WebhookNotifier},
    report::compose_report,
    types::{FailurePolicy, FetcherKind, GasPrices, MetricSample},
};

/// What a successful run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every fetcher succeeded; the report carries real values throughout
    Complete,
    /// The gas oracle failed; the report went out with error markers
    Degraded,
}

/// Orchestrates one monitoring cycle over pluggable collaborators
pub struct MiningMonitor {
    config: MonitorConfig,
    mining: Box<dyn MiningStatsFetcher>,
    gas: Box<dyn GasPriceFetcher>,
    wallet: Box<dyn WalletBalanceFetcher>,
    history: Option<Box<dyn HistoryStore>>,
    notifier: Box<dyn ReportNotifier>,
}

impl MiningMonitor {
    /// Creates a monitor wired to the real HTTP collaborators
    pub fn new(config: MonitorConfig) -> Result<Self, RunError> {
        let mining = EthermineClient::new().map_err(|e| RunError::Fetch {
            fetcher: FetcherKind::MiningStats.name(),
            source: e,
        })?;
        let gas = GasnowClient::new(config.gas_precision).map_err(|e| RunError::Fetch {
            fetcher: FetcherKind::GasPrice.name(),
            source: e,
        })?;
        let wallet = EthplorerClient::new(config.ethplorer_api_key.clone(), config.share_count)
            .map_err(|e| RunError::Fetch {
                fetcher: FetcherKind::WalletBalance.name(),
                source: e,
            })?;
        let history: Option<Box<dyn HistoryStore>> = config
            .history_path
            .as_ref()
            .map(|path| {
                Box::new(CsvHistoryStore::new(path, config.history_max_len))
                    as Box<dyn HistoryStore>
            });
        let notifier = WebhookNotifier::new(config.webhook_url.clone())?;

        Ok(Self {
            config,
            mining: Box::new(mining),
            gas: Box::new(gas),
            wallet: Box::new(wallet),
            history,
            notifier: Box::new(notifier),
        })
    }

    /// Creates a monitor over explicit collaborators
    ///
    /// This is primarily for testing with mocks.
    pub fn with_collaborators(
        config: MonitorConfig,
        mining: Box<dyn MiningStatsFetcher>,
        gas: Box<dyn GasPriceFetcher>,
        wallet: Box<dyn WalletBalanceFetcher>,
        history: Option<Box<dyn HistoryStore>>,
        notifier: Box<dyn ReportNotifier>,
    ) -> Self {
        Self {
            config,
            mining,
            gas,
            wallet,
            history,
            notifier,
        }
    }

    /// Executes one observation cycle
    ///
    /// Hard-failing fetchers abort the run before anything is persisted or
    /// sent; a gas oracle failure degrades the report instead. A history or
    /// webhook failure after the fetches surfaces as the run's outcome for
    /// the scheduler to log.
    pub async fn run_once(&self) -> Result<RunOutcome, RunError> {
        tracing::info!(wallet = %self.config.wallet, "Beginning execution");

        let mining = self
            .mining
            .fetch_mining_stats(&self.config.wallet)
            .await
            .map_err(|e| RunError::Fetch {
                fetcher: FetcherKind::MiningStats.name(),
                source: e,
            })?;

        let gas = match self.gas.fetch_gas_prices().await {
            Ok(gas) => gas,
            Err(e) => match FetcherKind::GasPrice.failure_policy() {
                FailurePolicy::SoftFailWithMarker => {
                    tracing::warn!(error = %e, "Gas fetch failed, reporting error markers");
                    GasPrices::unavailable()
                }
                FailurePolicy::HardFail => {
                    return Err(RunError::Fetch {
                        fetcher: FetcherKind::GasPrice.name(),
                        source: e,
                    })
                }
            },
        };

        let wallet = self
            .wallet
            .fetch_wallet_balance(&self.config.wallet)
            .await
            .map_err(|e| RunError::Fetch {
                fetcher: FetcherKind::WalletBalance.name(),
                source: e,
            })?;

        let sample = MetricSample::new(mining, gas, wallet);

        let delta = match &self.history {
            Some(history) => {
                let last = history.read_last().await?;
                let delta = compute_delta(sample.mining.unpaid_progress_pct, last.as_ref());
                let record =
                    HistoryRecord::from_sample(&sample, delta.map_or(0.0, |d| d.progress_delta_pct));
                history.append(&record).await?;
                delta
            }
            None => None,
        };

        let report = compose_report(&self.config.wallet, &sample, delta.as_ref());
        self.notifier.send(&report).await?;

        let outcome = if sample.gas.is_degraded() {
            RunOutcome::Degraded
        } else {
            RunOutcome::Complete
        };
        tracing::info!(outcome = ?outcome, "Execution finished");
        Ok(outcome)
    }
}
