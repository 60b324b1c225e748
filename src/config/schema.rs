//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mailer.
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;

use crate::config::entry::DeliveryConfig;

/// Root configuration for the mailer.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MailerConfig {
    /// Ordered provider chain (failover priority).
    pub providers: DeliveryConfig,

    /// Outbound HTTP settings shared by every vendor adapter.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time for one vendor request/response in seconds.
    pub request_timeout_secs: u64,

    /// User-Agent sent to vendor APIs.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            user_agent: concat!("mail-failover/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
