//! Failover email delivery.
//!
//! A message is handed to an ordered chain of vendor adapters; the first
//! vendor that accepts it wins, and if every vendor fails the caller gets one
//! error describing each failure.
//!
//! ```text
//!   Message ──▶ FailoverEngine ──▶ ProviderRegistry ──▶ VendorAdapter ──▶ Transport ──▶ vendor API
//!                    │                                      │
//!               ConfigHandle                          TokenCache / SigV4
//!            (ordered chain, hot-swappable)
//! ```

pub mod auth;
pub mod config;
pub mod delivery;
pub mod message;
pub mod observability;
pub mod providers;
pub mod registry;
pub mod transport;

pub use config::schema::MailerConfig;
pub use delivery::{DeliveryError, DeliveryFailedError, DeliveryOutcome, FailoverEngine};
pub use message::Message;
pub use providers::{ProviderError, VendorAdapter};
pub use registry::ProviderRegistry;
