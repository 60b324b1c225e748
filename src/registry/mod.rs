//! Provider registry.
//!
//! # Responsibilities
//! - Map provider ids to adapters
//! - Allow adapters to be added, replaced or removed while deliveries run
//!
//! # Design Decisions
//! - `DashMap` behind an `Arc`: clones share one map
//! - Lookups clone the adapter `Arc` out of the map, so no shard lock is held
//!   while an adapter runs
//! - A change affects lookups made after it; an attempt that already resolved
//!   an adapter keeps using it

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::ProviderId;
use crate::providers::{self, VendorAdapter};
use crate::transport::Transport;

/// Thread-safe id → adapter map.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: Arc<DashMap<ProviderId, Arc<dyn VendorAdapter>>>,
}

impl ProviderRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in adapter, all sharing `transport`.
    pub fn with_builtin(transport: Arc<dyn Transport>) -> Self {
        let registry = Self::new();
        for (id, adapter) in providers::builtin(transport) {
            registry.register(id, adapter);
        }
        registry
    }

    /// Insert or replace the adapter for `id`.
    pub fn register(&self, id: impl Into<ProviderId>, adapter: Arc<dyn VendorAdapter>) {
        let id = id.into();
        if self.adapters.insert(id.clone(), adapter).is_some() {
            tracing::debug!(provider = %id, "Replaced provider adapter");
        }
    }

    /// Remove the adapter for `id`, returning it if one was registered.
    pub fn unregister(&self, id: &str) -> Option<Arc<dyn VendorAdapter>> {
        self.adapters.remove(id).map(|(_, adapter)| adapter)
    }

    pub fn resolve(&self, id: &str) -> Option<Arc<dyn VendorAdapter>> {
        self.adapters.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// Snapshot of every registration, sorted by id.
    pub fn all(&self) -> Vec<(ProviderId, Arc<dyn VendorAdapter>)> {
        let mut all: Vec<_> = self
            .adapters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<ProviderId> {
        self.all().into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
