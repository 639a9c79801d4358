//! Collaborator interfaces for price observation handling
//!
//! The core never fetches, persists, or caches anything itself. These traits
//! are the narrow contracts the surrounding system implements: an append-only
//! observation store, a read-only selector configuration provider, and a
//! best-effort reconciliation cache.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;

use crate::domain::observation::{Observation, ReconciledPrice};
use crate::domain::selectors::SelectorSet;

/// Append-only storage for price observations.
///
/// No ordering guarantee is required from `find_by_product`; the
/// reconciliation engine re-derives recency from each observation's
/// timestamp.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    async fn save(&self, observation: &Observation) -> Result<()>;
    async fn find_by_product(
        &self,
        shop_domain: &str,
        product_url: &str,
    ) -> Result<Vec<Observation>>;
}

/// Read-only selector configuration, loaded once and injected.
///
/// Implementations fall back to a process-wide default set when a shop has no
/// specific configuration; callers always get a usable `SelectorSet`.
pub trait SelectorProvider: Send + Sync {
    fn selectors_for(&self, shop_domain: &str) -> SelectorSet;
}

/// Best-effort memoization of reconciliation results.
///
/// Reconciliation is read far more often than observations change, so results
/// are cached briefly per (shop, product) key. The engine stays correct (just
/// slower) with a no-op implementation, and concurrent recomputes racing on
/// the same key are fine: recomputation is idempotent and cheap.
#[async_trait]
pub trait ReconciliationCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<ReconciledPrice>;
    async fn put(&self, key: &str, value: &ReconciledPrice, ttl: Duration);
}
