//! Report delivery
//!
//! Posts the composed message to a Discord-style webhook. Delivery failures
//! surface as the run's outcome; there are no internal retries.

use crate::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::NotifyError;
use crate::report::WebhookMessage;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Delivers a composed report to the notification channel
#[async_trait]
pub trait ReportNotifier: Send + Sync {
    /// Sends the message; returns once the channel has accepted it
    async fn send(&self, message: &WebhookMessage) -> Result<(), NotifyError>;
}

/// Webhook-backed notifier
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    /// Creates a notifier posting to `webhook_url`
    pub fn new(webhook_url: String) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(NotifyError::Network)?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl ReportNotifier for WebhookNotifier {
    async fn send(&self, message: &WebhookMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await
            .map_err(NotifyError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        tracing::info!("Report delivered to webhook");
        Ok(())
    }
}
