//! Canonical price service
//!
//! The read side: pull every stored observation for a (shop, product) pair,
//! run the reconciliation engine, and memoize the winner briefly. Canonical
//! prices are read far more often than observations change, so a short TTL
//! absorbs almost all of the load; correctness never depends on the cache.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::domain::observation::ReconciledPrice;
use crate::domain::repositories::{ObservationStore, ReconciliationCache};
use crate::domain::services::ReconciliationEngine;

/// Default memoization TTL for reconciliation results.
const DEFAULT_CACHE_TTL_MINUTES: i64 = 5;

/// Read-side service combining store, engine, and cache.
pub struct CanonicalPriceService {
    store: Arc<dyn ObservationStore>,
    cache: Arc<dyn ReconciliationCache>,
    engine: ReconciliationEngine,
    cache_ttl: Duration,
}

impl CanonicalPriceService {
    pub fn new(store: Arc<dyn ObservationStore>, cache: Arc<dyn ReconciliationCache>) -> Self {
        Self {
            store,
            cache,
            engine: ReconciliationEngine::new(),
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// The canonical price for one (shop, product) pair, or `None` when no
    /// usable observation exists. Absence is a normal outcome, not an error.
    ///
    /// Concurrent calls for the same key may race to recompute and overwrite
    /// the cache entry; recomputation is idempotent, so no locking is needed.
    pub async fn canonical_price(
        &self,
        shop_domain: &str,
        product_url: &str,
    ) -> Result<Option<ReconciledPrice>> {
        let key = cache_key(shop_domain, product_url);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(shop = shop_domain, url = product_url, "cache hit");
            return Ok(Some(hit));
        }

        let observations = self.store.find_by_product(shop_domain, product_url).await?;
        let winner = self.engine.reconcile(&observations, Utc::now());

        match &winner {
            Some(price) => {
                self.cache.put(&key, price, self.cache_ttl).await;
                info!(
                    shop = shop_domain,
                    url = product_url,
                    source = price.source.as_str(),
                    price = price.price,
                    currency = %price.currency,
                    considered = observations.len(),
                    "reconciled canonical price"
                );
            }
            None => {
                info!(
                    shop = shop_domain,
                    url = product_url,
                    considered = observations.len(),
                    "no canonical price available"
                );
            }
        }
        Ok(winner)
    }
}

fn cache_key(shop_domain: &str, product_url: &str) -> String {
    format!("canonical-price:{shop_domain}:{product_url}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{Observation, ObservationSource};
    use crate::domain::repositories::ObservationStore;
    use crate::infrastructure::memory::{InMemoryCache, InMemoryObservationStore, NoopCache};

    fn obs(source: ObservationSource, price: f64, minutes_old: i64) -> Observation {
        Observation::new(
            source,
            "shop.example",
            "https://shop.example/p/1",
            price,
            "EUR",
            Utc::now() - Duration::minutes(minutes_old),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_none_for_unknown_product() {
        let svc = CanonicalPriceService::new(
            Arc::new(InMemoryObservationStore::new()),
            Arc::new(NoopCache),
        );
        let price = svc
            .canonical_price("shop.example", "https://shop.example/p/unknown")
            .await
            .unwrap();
        assert_eq!(price, None);
    }

    #[tokio::test]
    async fn reconciles_through_store() {
        let store = Arc::new(InMemoryObservationStore::new());
        store
            .save(&obs(ObservationSource::BackgroundCrawler, 80.0, 20 * 60))
            .await
            .unwrap();
        let fresh = obs(ObservationSource::LiveExtension, 100.0, 5);
        store.save(&fresh).await.unwrap();

        let svc = CanonicalPriceService::new(store, Arc::new(NoopCache));
        let price = svc
            .canonical_price("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        assert_eq!(price, Some(fresh));
    }

    #[tokio::test]
    async fn cached_result_masks_newer_observations_until_expiry() {
        let store = Arc::new(InMemoryObservationStore::new());
        let first = obs(ObservationSource::LiveWebview, 50.0, 10);
        store.save(&first).await.unwrap();

        let svc = CanonicalPriceService::new(store.clone(), Arc::new(InMemoryCache::new()));
        let initial = svc
            .canonical_price("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        assert_eq!(initial, Some(first.clone()));

        // A fresher, more trusted observation arrives; the memoized result
        // is still served until the TTL lapses.
        store
            .save(&obs(ObservationSource::LiveExtension, 45.0, 1))
            .await
            .unwrap();
        let memoized = svc
            .canonical_price("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        assert_eq!(memoized, Some(first));
    }

    #[tokio::test]
    async fn works_identically_with_noop_cache() {
        let store = Arc::new(InMemoryObservationStore::new());
        let only = obs(ObservationSource::BackgroundCrawler, 30.0, 60);
        store.save(&only).await.unwrap();

        let svc = CanonicalPriceService::new(store, Arc::new(NoopCache));
        let a = svc
            .canonical_price("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        let b = svc
            .canonical_price("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        assert_eq!(a, Some(only));
        assert_eq!(a, b);
    }
}
