//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! FailoverEngine / adapters produce:
//!     → logging.rs (subscriber installed by the host binary)
//!     → metrics.rs (attempt, delivery and token counters)
//!     → tracing.rs (one span per delivery attempt, keyed by attempt_id)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber or a metrics
//!   recorder is left to the host
//! - JSON output for machine parsing, pretty output for terminals

pub mod logging;
pub mod metrics;
pub mod tracing;
