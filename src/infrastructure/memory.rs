//! In-memory collaborator implementations
//!
//! Reference implementations of the store and cache contracts, backed by
//! `tokio::sync::RwLock` maps. They document the expected semantics and back
//! the integration tests; production deployments provide their own.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::observation::{Observation, ReconciledPrice};
use crate::domain::repositories::{ObservationStore, ReconciliationCache};

/// Append-only observation store keyed by (shop, product).
#[derive(Debug, Default)]
pub struct InMemoryObservationStore {
    observations: tokio::sync::RwLock<HashMap<(String, String), Vec<Observation>>>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.observations.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn save(&self, observation: &Observation) -> Result<()> {
        let key = (
            observation.shop_domain.clone(),
            observation.product_url.clone(),
        );
        let mut guard = self.observations.write().await;
        guard.entry(key).or_default().push(observation.clone());
        Ok(())
    }

    async fn find_by_product(
        &self,
        shop_domain: &str,
        product_url: &str,
    ) -> Result<Vec<Observation>> {
        let guard = self.observations.read().await;
        Ok(guard
            .get(&(shop_domain.to_string(), product_url.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Cache entry with its expiry instant.
#[derive(Debug, Clone)]
struct CachedEntry {
    value: ReconciledPrice,
    expires_at: DateTime<Utc>,
}

/// TTL-bounded reconciliation cache.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: tokio::sync::RwLock<HashMap<String, CachedEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReconciliationCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<ReconciledPrice> {
        {
            let guard = self.entries.read().await;
            match guard.get(key) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: evict under a write lock so rotating keys do not leak.
        // Re-check first; another task may have refreshed the entry between
        // the two locks.
        let mut guard = self.entries.write().await;
        if let Some(entry) = guard.get(key) {
            if entry.expires_at > Utc::now() {
                return Some(entry.value.clone());
            }
            guard.remove(key);
            debug!(key, "evicted expired cache entry");
        }
        None
    }

    async fn put(&self, key: &str, value: &ReconciledPrice, ttl: Duration) {
        let mut guard = self.entries.write().await;
        guard.insert(
            key.to_string(),
            CachedEntry {
                value: value.clone(),
                expires_at: Utc::now() + ttl,
            },
        );
    }
}

/// Pass-through cache: every lookup misses, every write is dropped.
///
/// Reconciliation must stay correct (just slower) with this implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl ReconciliationCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<ReconciledPrice> {
        None
    }

    async fn put(&self, _key: &str, _value: &ReconciledPrice, _ttl: Duration) {}
}
