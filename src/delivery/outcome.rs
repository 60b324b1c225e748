//! Per-provider attempt results.

use crate::config::ProviderId;
use crate::transport::VendorResponse;

/// Result of one provider attempt. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub provider: ProviderId,
    pub success: bool,
    pub error: Option<String>,
    /// Vendor reply, when the vendor answered at all.
    pub response: Option<VendorResponse>,
}

impl DeliveryOutcome {
    pub fn succeeded(provider: ProviderId, response: VendorResponse) -> Self {
        Self {
            provider,
            success: true,
            error: None,
            response: Some(response),
        }
    }

    pub fn failed(
        provider: ProviderId,
        error: impl Into<String>,
        response: Option<VendorResponse>,
    ) -> Self {
        Self {
            provider,
            success: false,
            error: Some(error.into()),
            response,
        }
    }

    /// Error text, or empty for a success.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}
