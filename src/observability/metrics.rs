//! Delivery metrics.
//!
//! # Metrics
//! - `mailer_provider_attempts_total` (counter): one per provider attempt, by
//!   provider and outcome (`success` / `failure`)
//! - `mailer_deliveries_total` (counter): one per `deliver` call, by outcome
//!   (`delivered` / `failed` / `rejected`)
//! - `mailer_token_refreshes_total` (counter): access tokens fetched, by provider
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op.

use metrics::counter;

pub const PROVIDER_ATTEMPTS: &str = "mailer_provider_attempts_total";
pub const DELIVERIES: &str = "mailer_deliveries_total";
pub const TOKEN_REFRESHES: &str = "mailer_token_refreshes_total";

/// Outcome label of a whole delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcomeLabel {
    Delivered,
    Failed,
    /// Message or configuration invalid; no provider contacted.
    Rejected,
}

impl DeliveryOutcomeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Rejected => "rejected",
        }
    }
}

pub fn record_provider_attempt(provider: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(PROVIDER_ATTEMPTS, "provider" => provider.to_string(), "outcome" => outcome).increment(1);
}

pub fn record_delivery(outcome: DeliveryOutcomeLabel) {
    counter!(DELIVERIES, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_token_refresh(provider: &str) {
    counter!(TOKEN_REFRESHES, "provider" => provider.to_string()).increment(1);
}
