//! Delivery attempt spans.
//!
//! Every event logged while a message moves through the provider chain is
//! recorded inside one `delivery` span, so a single `attempt_id` ties the
//! per-provider events of one attempt together.

use tracing::Span;
use uuid::Uuid;

/// Fresh correlation id for one delivery attempt.
pub fn new_attempt_id() -> Uuid {
    Uuid::new_v4()
}

/// Span covering one delivery attempt.
pub fn delivery_span(attempt_id: Uuid, recipients: &str) -> Span {
    tracing::info_span!("delivery", %attempt_id, recipients)
}

/// Child span for one provider within an attempt.
pub fn provider_span(provider: &str, position: usize) -> Span {
    tracing::debug_span!("provider", provider, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_ids_are_unique_v4() {
        let a = new_attempt_id();
        let b = new_attempt_id();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }
}
