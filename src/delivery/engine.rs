//! The failover engine.
//!
//! # Responsibilities
//! - Validate the message and the provider chain before contacting anyone
//! - Try providers strictly in configured order, each at most once
//! - Stop at the first success; otherwise aggregate every failure
//! - Contain adapter panics to the provider that raised them

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tracing::Instrument;

use crate::config::{ConfigHandle, CredentialValue, MailerConfig, ProviderEntry};
use crate::delivery::error::{DeliveryError, DeliveryFailedError};
use crate::delivery::outcome::DeliveryOutcome;
use crate::message::Message;
use crate::observability::metrics::{self, DeliveryOutcomeLabel};
use crate::observability::tracing::{delivery_span, new_attempt_id, provider_span};
use crate::registry::ProviderRegistry;
use crate::transport::ReqwestTransport;

pub const UNKNOWN_PROVIDER: &str = "unknown provider";
pub const CREDENTIALS_NOT_A_MAPPING: &str = "credentials must be a mapping";

/// Sends messages through the configured provider chain.
///
/// Cheap to clone; clones share the registry and the chain.
#[derive(Debug, Clone)]
pub struct FailoverEngine {
    registry: ProviderRegistry,
    config: ConfigHandle,
}

impl FailoverEngine {
    pub fn new(registry: ProviderRegistry, config: impl Into<ConfigHandle>) -> Self {
        Self {
            registry,
            config: config.into(),
        }
    }

    /// Engine over the built-in adapters and a `reqwest` transport.
    pub fn from_config(config: &MailerConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Self::new(
            ProviderRegistry::with_builtin(Arc::new(transport)),
            config.providers.clone(),
        ))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Handle to the live chain; replacing it affects the next delivery.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Deliver `message` through the first provider that accepts it.
    ///
    /// Returns the winning provider's outcome. Earlier failures are only
    /// logged.
    pub async fn deliver(&self, message: &Message) -> Result<DeliveryOutcome, DeliveryError> {
        let span = delivery_span(new_attempt_id(), &message.to.join(", "));
        let result = self.run(message).instrument(span).await;

        let label = match &result {
            Ok(_) => DeliveryOutcomeLabel::Delivered,
            Err(DeliveryError::Failed(_)) => DeliveryOutcomeLabel::Failed,
            Err(_) => DeliveryOutcomeLabel::Rejected,
        };
        metrics::record_delivery(label);
        result
    }

    async fn run(&self, message: &Message) -> Result<DeliveryOutcome, DeliveryError> {
        message.validate()?;

        // One snapshot for the whole attempt.
        let chain = self.config.load();
        chain.validate()?;

        let mut failures = Vec::with_capacity(chain.len());
        for (position, entry) in chain.entries().iter().enumerate() {
            let outcome = self
                .attempt(entry, message)
                .instrument(provider_span(entry.id.as_str(), position))
                .await;
            metrics::record_provider_attempt(entry.id.as_str(), outcome.success);

            if outcome.success {
                tracing::info!(provider = %entry.id, "delivered via {}", entry.id);
                return Ok(outcome);
            }

            tracing::error!(
                provider = %entry.id,
                error = outcome.error_text(),
                "{} failed: {}",
                entry.id,
                outcome.error_text()
            );
            failures.push(outcome);
        }

        Err(DeliveryFailedError {
            recipients: message.to.clone(),
            outcomes: failures,
        }
        .into())
    }

    async fn attempt(&self, entry: &ProviderEntry, message: &Message) -> DeliveryOutcome {
        let id = entry.id.clone();

        let Some(adapter) = self.registry.resolve(id.as_str()) else {
            return DeliveryOutcome::failed(id, UNKNOWN_PROVIDER, None);
        };

        let credentials = match &entry.credentials {
            CredentialValue::Mapping(credentials) => credentials,
            CredentialValue::Malformed { found } => {
                tracing::debug!(provider = %id, found, "Credentials are not a mapping of scalars");
                return DeliveryOutcome::failed(id, CREDENTIALS_NOT_A_MAPPING, None);
            }
        };

        match AssertUnwindSafe(adapter.deliver(message, credentials))
            .catch_unwind()
            .await
        {
            Ok(Ok(response)) => DeliveryOutcome::succeeded(id, response),
            Ok(Err(err)) => {
                let response = err.response().cloned();
                DeliveryOutcome::failed(id, err.to_string(), response)
            }
            Err(panic) => DeliveryOutcome::failed(id, panic_message(&*panic), None),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "adapter panicked".to_string()
    }
}
