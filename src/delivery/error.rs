//! Errors returned by [`FailoverEngine::deliver`](crate::delivery::FailoverEngine::deliver).

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::delivery::outcome::DeliveryOutcome;
use crate::message::ValidationError;

/// Every configured provider was attempted and none succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "All email providers failed for {}. Errors: {}",
    .recipients.join(", "),
    summarize(.outcomes)
)]
pub struct DeliveryFailedError {
    pub recipients: Vec<String>,
    /// One failed outcome per attempted provider, in attempt order.
    pub outcomes: Vec<DeliveryOutcome>,
}

fn summarize(outcomes: &[DeliveryOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| format!("{}: {}", outcome.provider, outcome.error_text()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a delivery did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The message is incomplete; no provider was contacted.
    #[error("invalid message: {0}")]
    Validation(#[from] ValidationError),

    /// The provider chain is unusable; no provider was contacted.
    #[error("invalid delivery configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Failed(#[from] DeliveryFailedError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::VendorResponse;

    #[test]
    fn test_aggregate_message() {
        let err = DeliveryFailedError {
            recipients: vec!["a@example.com".into(), "b@example.com".into()],
            outcomes: vec![
                DeliveryOutcome::failed("send_grid".into(), "API error: 500 down", Some(VendorResponse::new(500, "down"))),
                DeliveryOutcome::failed("mailgun".into(), "unknown provider", None),
            ],
        };
        assert_eq!(
            err.to_string(),
            "All email providers failed for a@example.com, b@example.com. \
             Errors: send_grid: API error: 500 down; mailgun: unknown provider"
        );
    }

    #[test]
    fn test_wrapped_errors() {
        let err = DeliveryError::from(ValidationError::NoRecipients);
        assert_eq!(err.to_string(), "invalid message: message has no recipients");

        let err = DeliveryError::from(ConfigurationError::NoProviders);
        assert_eq!(err.to_string(), "invalid delivery configuration: no providers configured");
    }
}
