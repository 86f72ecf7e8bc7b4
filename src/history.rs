//! Rolling CSV history of past samples
//!
//! One row is appended per run; once the file holds `max_len` rows the
//! oldest rows are dropped (FIFO). The store is an optional collaborator:
//! without it the monitor still runs, it just cannot compute deltas.
//!
//! No file locking is done. Concurrent runs against the same file must be
//! serialized by the scheduler.

use crate::error::HistoryError;
use crate::types::MetricSample;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One persisted history row
///
/// Column names are kept byte-for-byte compatible with existing history
/// files, hence the mixed naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "hashrate")]
    pub hashrate_mhs: f64,
    #[serde(rename = "walletBalanceEth")]
    pub wallet_balance_eth: f64,
    #[serde(rename = "walletBalanceUSD")]
    pub wallet_balance_usd: f64,
    #[serde(rename = "progresspct")]
    pub progress_pct: f64,
    #[serde(rename = "progresseth")]
    pub progress_eth: f64,
    #[serde(rename = "progressSinceLastExecution")]
    pub progress_delta_pct: f64,
}

impl HistoryRecord {
    /// Builds the row persisted for a sample
    ///
    /// `progress_delta_pct` is the delta computed this run (1 significant
    /// digit), or 0 when there was no prior record to diff against.
    pub fn from_sample(sample: &MetricSample, progress_delta_pct: f64) -> Self {
        Self {
            timestamp: sample.timestamp,
            hashrate_mhs: sample.mining.hashrate_mhs,
            wallet_balance_eth: sample.wallet.balance_eth,
            wallet_balance_usd: sample.wallet.balance_usd,
            progress_pct: sample.mining.unpaid_progress_pct,
            progress_eth: sample.mining.unpaid_progress_eth,
            progress_delta_pct,
        }
    }
}

/// Read-last/append contract over the rolling history
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns the most recent record, if any
    async fn read_last(&self) -> Result<Option<HistoryRecord>, HistoryError>;

    /// Appends a record, evicting the oldest rows past the FIFO bound
    async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError>;
}

/// CSV-file-backed history store
pub struct CsvHistoryStore {
    path: PathBuf,
    max_len: usize,
}

impl CsvHistoryStore {
    /// Creates a store over `path`, bounded to `max_len` rows
    pub fn new(path: impl AsRef<Path>, max_len: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_len,
        }
    }

    /// Reads every row; a missing file is an empty history, not an error
    fn read_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    fn write_all(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for CsvHistoryStore {
    async fn read_last(&self) -> Result<Option<HistoryRecord>, HistoryError> {
        Ok(self.read_all()?.pop())
    }

    async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        let mut records = self.read_all()?;
        records.push(record.clone());
        // FIFO bound: drop oldest rows first
        if records.len() > self.max_len {
            let excess = records.len() - self.max_len;
            records.drain(..excess);
        }
        tracing::debug!(
            rows = records.len(),
            path = %self.path.display(),
            "Writing history"
        );
        self.write_all(&records)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// In-memory history store for tests
    pub struct MemoryHistoryStore {
        records: Mutex<Vec<HistoryRecord>>,
        max_len: usize,
    }

    impl MemoryHistoryStore {
        pub fn new(max_len: usize) -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                max_len,
            }
        }

        pub fn with_records(records: Vec<HistoryRecord>, max_len: usize) -> Self {
            Self {
                records: Mutex::new(records),
                max_len,
            }
        }

        pub fn records(&self) -> Vec<HistoryRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HistoryStore for MemoryHistoryStore {
        async fn read_last(&self) -> Result<Option<HistoryRecord>, HistoryError> {
            Ok(self.records.lock().unwrap().last().cloned())
        }

        async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
            let mut records = self.records.lock().unwrap();
            records.push(record.clone());
            if records.len() > self.max_len {
                let excess = records.len() - self.max_len;
                records.drain(..excess);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(progress_pct: f64, delta: f64) -> HistoryRecord {
        HistoryRecord {
            timestamp: Utc.with_ymd_and_hms(2021, 5, 1, 12, 0, 0).unwrap(),
            hashrate_mhs: 123.46,
            wallet_balance_eth: 1.23456,
            wallet_balance_usd: 2469.12,
            progress_pct,
            progress_eth: 0.02469,
            progress_delta_pct: delta,
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvHistoryStore::new(dir.path().join("none.csv"), 10);
        assert_eq!(store.read_last().await.unwrap(), None);
    }

    #[tokio::test]
    async fn round_trips_records_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvHistoryStore::new(dir.path().join("history.csv"), 10);

        let first = record(10.0, 0.0);
        let second = record(12.5, 3.0);
        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        assert_eq!(store.read_last().await.unwrap(), Some(second));
        assert_eq!(store.read_all().unwrap(), vec![first, record(12.5, 3.0)]);
    }

    #[tokio::test]
    async fn writes_expected_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let store = CsvHistoryStore::new(&path, 10);
        store.append(&record(1.0, 0.0)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "timestamp,hashrate,walletBalanceEth,walletBalanceUSD,progresspct,progresseth,progressSinceLastExecution"
        );
    }

    #[tokio::test]
    async fn evicts_oldest_rows_past_the_bound() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvHistoryStore::new(dir.path().join("history.csv"), 3);

        for pct in [1.0, 2.0, 3.0, 4.0] {
            store.append(&record(pct, 0.0)).await.unwrap();
        }

        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 3);
        // Oldest (pct=1.0) was dropped
        assert_eq!(records[0].progress_pct, 2.0);
        assert_eq!(records[2].progress_pct, 4.0);
    }
}
