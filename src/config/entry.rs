//! Provider entries and the ordered delivery chain.
//!
//! The host describes each entry as a mapping with exactly one key, the
//! provider id, whose value is that provider's credentials:
//!
//! ```toml
//! providers = [
//!   { send_grid = { api_key = "SG-KEY" } },
//!   { mailgun = { domain = "mg.example.com", api_key = "MG-KEY" } },
//! ]
//! ```
//!
//! The single-key shape is checked when an entry is constructed. A value that
//! is not a credential mapping is kept as [`CredentialValue::Malformed`] and
//! only fails that provider's attempt at dispatch time.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::providers::ProviderError;

/// Errors in the shape of the delivery chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no providers configured")]
    NoProviders,

    #[error("provider list must be a sequence of entries")]
    NotASequence,

    /// An entry does not map exactly one provider id to its credentials.
    #[error("malformed provider entry {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

/// Symbolic provider identifier, e.g. `send_grid`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProviderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Credential fields for one provider entry.
///
/// Blank values are treated as absent by every accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value of `key` if present and non-blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Fetch every field in `fields`, or report all the missing ones at once.
    pub fn require<const N: usize>(
        &self,
        vendor: &'static str,
        fields: [&'static str; N],
    ) -> Result<[&str; N], ProviderError> {
        let mut missing = Vec::new();
        let values = fields.map(|field| match self.get(field) {
            Some(value) => value,
            None => {
                missing.push(field);
                ""
            }
        });

        if missing.is_empty() {
            Ok(values)
        } else {
            Err(ProviderError::MissingCredentials {
                vendor,
                fields: missing,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitute `${NAME}` values from the process environment.
    ///
    /// Fields whose variable is unset are dropped so adapters see them as
    /// missing.
    pub fn resolve_env(&mut self) {
        self.0.retain(|_, value| {
            let Some(name) = env_reference(value).map(str::to_owned) else {
                return true;
            };
            match std::env::var(&name) {
                Ok(resolved) => {
                    *value = resolved;
                    true
                }
                Err(_) => {
                    tracing::warn!(variable = %name, "Credential variable not set");
                    false
                }
            }
        });
    }

    /// Build from a JSON object of scalars. Null fields are skipped.
    ///
    /// On failure, returns a description of what was found instead.
    fn from_json(value: &Value) -> Result<Self, &'static str> {
        let object = value.as_object().ok_or_else(|| kind_of(value))?;
        let mut creds = Self::new();
        for (key, field) in object {
            match field {
                Value::Null => {}
                Value::String(s) => creds.insert(key.as_str(), s.as_str()),
                Value::Number(n) => creds.insert(key.as_str(), n.to_string()),
                Value::Bool(b) => creds.insert(key.as_str(), b.to_string()),
                Value::Array(_) => return Err("mapping with a sequence field"),
                Value::Object(_) => return Err("mapping with a nested mapping field"),
            }
        }
        Ok(creds)
    }
}

fn env_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

/// The configured credential value of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValue {
    Mapping(Credentials),
    /// Not a mapping of scalar fields; `found` describes what was configured.
    Malformed { found: &'static str },
}

/// One link in the delivery chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    pub id: ProviderId,
    pub credentials: CredentialValue,
}

impl ProviderEntry {
    pub fn new(id: impl Into<ProviderId>, credentials: Credentials) -> Self {
        Self {
            id: id.into(),
            credentials: CredentialValue::Mapping(credentials),
        }
    }

    /// Parse the host's single-key shape, e.g. `{"brevo": {"api_key": "k"}}`.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, ConfigurationError> {
        let object = value
            .as_object()
            .ok_or_else(|| ConfigurationError::MalformedEntry {
                index,
                reason: format!("expected a mapping, found {}", kind_of(value)),
            })?;

        let mut keys = object.iter();
        match (keys.next(), keys.next()) {
            (Some((id, creds)), None) => {
                let credentials = match Credentials::from_json(creds) {
                    Ok(creds) => CredentialValue::Mapping(creds),
                    Err(found) => CredentialValue::Malformed { found },
                };
                Ok(Self {
                    id: ProviderId::new(id.as_str()),
                    credentials,
                })
            }
            _ => Err(ConfigurationError::MalformedEntry {
                index,
                reason: format!(
                    "expected exactly one provider id, found {} keys",
                    object.len()
                ),
            }),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Ordered provider chain; order is failover priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryConfig {
    entries: Vec<ProviderEntry>,
}

impl DeliveryConfig {
    pub fn new(entries: Vec<ProviderEntry>) -> Self {
        Self { entries }
    }

    /// Parse a sequence of single-key entries.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        let items = value.as_array().ok_or(ConfigurationError::NotASequence)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| ProviderEntry::from_value(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: ProviderEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty, and every entry names a provider.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.entries.is_empty() {
            return Err(ConfigurationError::NoProviders);
        }
        if let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.id.as_str().trim().is_empty())
        {
            return Err(ConfigurationError::MalformedEntry {
                index,
                reason: "provider id is blank".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve `${NAME}` credential references in every entry.
    pub fn resolve_env(&mut self) {
        for entry in &mut self.entries {
            if let CredentialValue::Mapping(creds) = &mut entry.credentials {
                creds.resolve_env();
            }
        }
    }
}

impl<'de> Deserialize<'de> for DeliveryConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
