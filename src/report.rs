//! Report composition
//!
//! Turns a [`MetricSample`] plus an optional [`DeltaResult`] into the
//! webhook message. Field order is fixed; the delta field is appended last
//! and only when the progress delta is strictly positive (negative deltas
//! are hidden, preserving the original report's behavior).

use crate::constants::{ETHERMINE_DASHBOARD_URL, REPORT_TITLE, WEBHOOK_USERNAME};
use crate::rounding::{fmt_dp, fmt_sig};
use crate::types::{DeltaResult, MetricSample};
use serde::Serialize;

/// Discord-style webhook message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub username: String,
    pub embeds: Vec<Embed>,
}

/// One embed block in the webhook message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub fields: Vec<EmbedField>,
}

/// One name/value field inside an embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline: true,
        }
    }
}

/// Composes the report message for one sample
pub fn compose_report(
    wallet: &str,
    sample: &MetricSample,
    delta: Option<&DeltaResult>,
) -> WebhookMessage {
    let mut fields = vec![
        EmbedField::inline(
            "Current progress",
            format!("{}%", fmt_dp(sample.mining.unpaid_progress_pct, 2)),
        ),
        EmbedField::inline("Active workers", sample.mining.active_workers.to_string()),
        EmbedField::inline(
            "Current hashrate",
            format!("{} MH/s", fmt_dp(sample.mining.hashrate_mhs, 2)),
        ),
        EmbedField::inline(
            "Wallet Balance (ETH / USD)",
            format!(
                "{} / ${}",
                fmt_dp(sample.wallet.balance_eth, 5),
                fmt_dp(sample.wallet.balance_usd, 2)
            ),
        ),
        EmbedField::inline(
            "Payout per share",
            format!("${}", fmt_dp(sample.wallet.share_payout_usd, 2)),
        ),
        EmbedField::inline(
            "Gas Rates",
            format!(
                "{} / {} / {} / {}",
                sample.gas.rapid, sample.gas.fast, sample.gas.standard, sample.gas.slow
            ),
        ),
        EmbedField::inline(
            "Current Eth Price",
            format!("${}", fmt_dp(sample.wallet.eth_usd_price, 2)),
        ),
    ];

    // Only a strictly positive delta is shown; zero and negative deltas are
    // silently dropped.
    if let Some(delta) = delta {
        if delta.progress_delta_pct > 0.0 {
            fields.push(EmbedField::inline(
                "Progress since last execution",
                format!(
                    "{}% ({})",
                    fmt_sig(delta.progress_delta_pct, 1),
                    fmt_sig(delta.progress_delta_of_delta, 1)
                ),
            ));
        }
    }

    WebhookMessage {
        username: WEBHOOK_USERNAME.to_string(),
        embeds: vec![Embed {
            title: REPORT_TITLE.to_string(),
            url: format!("{}/{}/dashboard", ETHERMINE_DASHBOARD_URL, wallet),
            fields,
        }],
    }
}
