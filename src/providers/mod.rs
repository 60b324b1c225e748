//! Vendor adapters.
//!
//! # Responsibilities
//! - Define the capability every delivery backend implements
//! - Translate a [`Message`] into each vendor's request format
//! - Normalize every failure into one [`ProviderError`] channel
//!
//! # Data Flow
//! ```text
//! FailoverEngine
//!     → VendorAdapter::deliver(message, credentials)
//!         → Credentials::require (missing fields → MissingCredentials)
//!         → [token cache / request signing]
//!         → PostRequest → Transport::post
//!     ← Ok(VendorResponse) | Err(ProviderError)
//! ```
//!
//! # Design Decisions
//! - Adapters are stateless apart from the token cache, so one instance
//!   serves every concurrent delivery
//! - Endpoints are overridable for tests and regional deployments

pub mod brevo;
pub mod mailgun;
pub mod one_signal;
pub mod postmark;
pub mod send_grid;
pub mod send_pulse;
pub mod ses;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Credentials, ProviderId};
use crate::message::Message;
use crate::transport::{Transport, VendorResponse};

pub use brevo::BrevoAdapter;
pub use mailgun::MailgunAdapter;
pub use one_signal::OneSignalAdapter;
pub use postmark::PostmarkAdapter;
pub use send_grid::SendGridAdapter;
pub use send_pulse::SendPulseAdapter;
pub use ses::SesAdapter;

pub const BREVO: &str = "brevo";
pub const SEND_GRID: &str = "send_grid";
pub const POSTMARK: &str = "postmark";
pub const SES: &str = "ses";
pub const MAILGUN: &str = "mailgun";
pub const SEND_PULSE: &str = "send_pulse";
pub const ONE_SIGNAL: &str = "one_signal";

/// Failure of a single provider attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("missing {vendor} credentials: {}", .fields.join(", "))]
    MissingCredentials {
        vendor: &'static str,
        fields: Vec<&'static str>,
    },

    /// The vendor answered with a non-2xx status.
    #[error("API error: {} {}", .response.status, .response.body)]
    Api { response: VendorResponse },

    /// No response was received (connect failure, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{vendor} token request failed: {reason}")]
    Token { vendor: &'static str, reason: String },

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("failed to sign request: {0}")]
    Signing(String),
}

impl ProviderError {
    /// The vendor reply attached to this failure, if any.
    pub fn response(&self) -> Option<&VendorResponse> {
        match self {
            Self::Api { response } => Some(response),
            _ => None,
        }
    }
}

/// A delivery backend.
#[async_trait]
pub trait VendorAdapter: Send + Sync {
    /// Send `message` with this entry's credentials.
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError>;
}

/// Built-in adapters sharing one transport.
pub fn builtin(transport: Arc<dyn Transport>) -> Vec<(ProviderId, Arc<dyn VendorAdapter>)> {
    vec![
        (
            BREVO.into(),
            Arc::new(BrevoAdapter::new(transport.clone())) as Arc<dyn VendorAdapter>,
        ),
        (SEND_GRID.into(), Arc::new(SendGridAdapter::new(transport.clone()))),
        (POSTMARK.into(), Arc::new(PostmarkAdapter::new(transport.clone()))),
        (SES.into(), Arc::new(SesAdapter::new(transport.clone()))),
        (MAILGUN.into(), Arc::new(MailgunAdapter::new(transport.clone()))),
        (SEND_PULSE.into(), Arc::new(SendPulseAdapter::new(transport.clone()))),
        (ONE_SIGNAL.into(), Arc::new(OneSignalAdapter::new(transport))),
    ]
}
