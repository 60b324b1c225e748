//! Failover delivery.
//!
//! # Data Flow
//! ```text
//! deliver(message)
//!     → Message::validate            (ValidationError, nothing sent)
//!     → ConfigHandle::load + validate (ConfigurationError, nothing sent)
//!     → for each entry, in order:
//!         registry lookup            (unknown provider → failure)
//!         credential shape check     (not a mapping → failure)
//!         adapter.deliver            (Err or panic → failure)
//!         first success              → return its outcome
//!     → all failed                   → DeliveryFailedError
//! ```

pub mod engine;
pub mod error;
pub mod outcome;

pub use engine::FailoverEngine;
pub use error::{DeliveryError, DeliveryFailedError};
pub use outcome::DeliveryOutcome;
