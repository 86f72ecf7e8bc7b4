//! HTTP clients for the external metric sources

pub mod ethermine;
pub mod ethplorer;
pub mod gasnow;

pub use ethermine::EthermineClient;
pub use ethplorer::EthplorerClient;
pub use gasnow::GasnowClient;
