//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the provider chain is usable
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MailerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::entry::ConfigurationError;
use crate::config::schema::MailerConfig;

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Providers(#[from] ConfigurationError),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("user_agent must not be empty")]
    EmptyUserAgent,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MailerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.providers.is_empty() {
        errors.push(ConfigurationError::NoProviders.into());
    }
    for (index, entry) in config.providers.entries().iter().enumerate() {
        if entry.id.as_str().trim().is_empty() {
            errors.push(
                ConfigurationError::MalformedEntry {
                    index,
                    reason: "provider id is blank".to_string(),
                }
                .into(),
            );
        }
    }

    if config.transport.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "transport.connect_timeout_secs",
        });
    }
    if config.transport.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "transport.request_timeout_secs",
        });
    }
    if config.transport.user_agent.trim().is_empty() {
        errors.push(ValidationError::EmptyUserAgent);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::entry::{Credentials, DeliveryConfig, ProviderEntry};

    #[test]
    fn test_collects_all_errors() {
        let mut config = MailerConfig::default();
        config.transport.connect_timeout_secs = 0;
        config.transport.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], ValidationError::Providers(ConfigurationError::NoProviders));
    }

    #[test]
    fn test_valid_config() {
        let mut config = MailerConfig::default();
        config.providers = DeliveryConfig::new(vec![ProviderEntry::new(
            "brevo",
            Credentials::new().with("api_key", "k"),
        )]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_blank_provider_id() {
        let mut config = MailerConfig::default();
        config.providers = DeliveryConfig::new(vec![
            ProviderEntry::new("brevo", Credentials::new()),
            ProviderEntry::new("", Credentials::new()),
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("entry 1"));
    }
}
