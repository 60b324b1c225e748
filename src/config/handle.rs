//! Shared, swappable delivery chain.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::entry::DeliveryConfig;

/// Cloneable handle to the live provider chain.
///
/// Every delivery attempt loads one snapshot; a replacement is visible to the
/// next attempt, never to one already in flight.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<DeliveryConfig>>,
}

impl ConfigHandle {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Current chain.
    pub fn load(&self) -> Arc<DeliveryConfig> {
        self.inner.load_full()
    }

    /// Replace the chain wholesale.
    pub fn replace(&self, config: DeliveryConfig) {
        self.inner.store(Arc::new(config));
    }

    /// Apply `f` to a copy of the current chain and publish the result.
    pub fn update(&self, f: impl Fn(&mut DeliveryConfig)) {
        self.inner.rcu(|current| {
            let mut next = DeliveryConfig::clone(current);
            f(&mut next);
            next
        });
    }
}

impl From<DeliveryConfig> for ConfigHandle {
    fn from(config: DeliveryConfig) -> Self {
        Self::new(config)
    }
}
