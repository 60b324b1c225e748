//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, resolve ${ENV} credentials)
//!     → validation.rs (semantic checks)
//!     → MailerConfig (validated)
//!     → providers published through handle.rs (ConfigHandle)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the provider chain
//!     → next delivery attempt observes new chain
//! ```
//!
//! # Design Decisions
//! - Provider entries are shape-checked when parsed, not during delivery
//! - All fields besides the provider list have defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod entry;
pub mod handle;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use entry::{
    ConfigurationError, CredentialValue, Credentials, DeliveryConfig, ProviderEntry, ProviderId,
};
pub use handle::ConfigHandle;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, MailerConfig, ObservabilityConfig, TransportConfig};
pub use watcher::ConfigWatcher;
