//! Observation capture service
//!
//! Coordinates one extraction pass: resolve the shop's selector set, pull the
//! raw field strings out of the markup, normalize price and currency, build a
//! validated observation, and append it to the store. Producers (extension
//! ingest endpoint, web view hook, crawler task) all go through this path so
//! every observation obeys the same invariants.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use url::Url;

use crate::domain::observation::{Observation, ObservationSource};
use crate::domain::repositories::{ObservationStore, SelectorProvider};
use crate::infrastructure::parsing::{
    normalize_price, DocumentExtractor, ExtractionError, ExtractionResult,
};

/// A captured observation plus the product name seen on the page.
///
/// The name is extracted alongside the price but is not part of the
/// observation itself; callers use it for catalog naming.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    pub observation: Observation,
    pub product_name: Option<String>,
}

/// High-level capture pipeline over the store and selector configuration.
pub struct ObservationCaptureService {
    store: Arc<dyn ObservationStore>,
    selectors: Arc<dyn SelectorProvider>,
}

impl ObservationCaptureService {
    pub fn new(store: Arc<dyn ObservationStore>, selectors: Arc<dyn SelectorProvider>) -> Self {
        Self { store, selectors }
    }

    /// Extract and persist one observation from raw markup.
    ///
    /// "No price found" is an expected outcome, surfaced as an
    /// `ExtractionError` for the caller to fall back on, not a fault.
    pub async fn capture(
        &self,
        source: ObservationSource,
        shop_domain: &str,
        product_url: &str,
        raw_markup: &str,
    ) -> Result<CaptureOutcome> {
        let outcome = self.extract(source, shop_domain, product_url, raw_markup, Utc::now())?;
        self.store.save(&outcome.observation).await?;
        info!(
            source = source.as_str(),
            shop = shop_domain,
            price = outcome.observation.price,
            currency = %outcome.observation.currency,
            "captured price observation"
        );
        Ok(outcome)
    }

    /// The pure extraction half of `capture`: no store access, explicit
    /// timestamp, directly unit-testable.
    pub fn extract(
        &self,
        source: ObservationSource,
        shop_domain: &str,
        product_url: &str,
        raw_markup: &str,
        observed_at: DateTime<Utc>,
    ) -> ExtractionResult<CaptureOutcome> {
        let selector_set = self.selectors.selectors_for(shop_domain);
        let extractor = DocumentExtractor::new(&selector_set);
        let fields = extractor.extract(raw_markup);
        debug!(shop = shop_domain, url = product_url, ?fields, "extracted raw fields");

        let raw_price = fields
            .price
            .ok_or_else(|| ExtractionError::no_price_found(product_url, None))?;
        let price = normalize_price(&raw_price)
            .ok_or_else(|| ExtractionError::no_price_found(product_url, Some(&raw_price)))?;

        let raw_currency = fields
            .currency
            .ok_or_else(|| ExtractionError::no_currency_found(product_url))?;

        let observation = Observation::new(
            source,
            shop_domain,
            product_url,
            price,
            &raw_currency,
            observed_at,
        )
        .ok_or_else(|| {
            ExtractionError::invalid_observation("price or currency outside accepted bounds")
        })?;

        Ok(CaptureOutcome {
            observation,
            product_name: fields.name,
        })
    }
}

/// Derive the shop domain from a product URL, e.g.
/// `https://shop.example/p/1` → `shop.example`.
pub fn shop_domain_for(product_url: &str) -> Option<String> {
    let parsed = Url::parse(product_url).ok()?;
    parsed.host_str().map(|h| h.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryObservationStore;
    use crate::infrastructure::parsing::ShopSelectorConfig;

    fn service(store: Arc<InMemoryObservationStore>) -> ObservationCaptureService {
        ObservationCaptureService::new(store, Arc::new(ShopSelectorConfig::default()))
    }

    const PAGE: &str = r#"<html><body>
        <h1>Trail Helmet</h1>
        <meta itemprop="priceCurrency" content="EUR">
        <span class="price">1.234,56</span>
    </body></html>"#;

    #[tokio::test]
    async fn capture_extracts_and_saves() {
        let store = Arc::new(InMemoryObservationStore::new());
        let svc = service(store.clone());

        let outcome = svc
            .capture(
                ObservationSource::LiveWebview,
                "shop.example",
                "https://shop.example/p/1",
                PAGE,
            )
            .await
            .unwrap();

        assert_eq!(outcome.observation.price, 1234.56);
        assert_eq!(outcome.observation.currency, "EUR");
        assert_eq!(outcome.product_name.as_deref(), Some("Trail Helmet"));

        let stored = store
            .find_by_product("shop.example", "https://shop.example/p/1")
            .await
            .unwrap();
        assert_eq!(stored, vec![outcome.observation]);
    }

    #[test]
    fn extract_reports_missing_price_as_expected_outcome() {
        let svc = service(Arc::new(InMemoryObservationStore::new()));
        let err = svc
            .extract(
                ObservationSource::BackgroundCrawler,
                "shop.example",
                "https://shop.example/p/2",
                "<p>sold out</p>",
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoPriceFound { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn extract_reports_unparseable_price_text() {
        let svc = service(Arc::new(InMemoryObservationStore::new()));
        let err = svc
            .extract(
                ObservationSource::BackgroundCrawler,
                "shop.example",
                "https://shop.example/p/3",
                r#"<span class="price">call us</span><b>€</b>"#,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoPriceFound { .. }));
    }

    #[test]
    fn extract_reports_missing_currency() {
        let svc = service(Arc::new(InMemoryObservationStore::new()));
        let err = svc
            .extract(
                ObservationSource::LiveExtension,
                "shop.example",
                "https://shop.example/p/4",
                r#"<span class="price">19.99</span>"#,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoCurrencyFound { .. }));
    }

    #[test]
    fn shop_domain_derivation() {
        assert_eq!(
            shop_domain_for("https://shop.example/p/1?ref=x").as_deref(),
            Some("shop.example")
        );
        assert_eq!(shop_domain_for("not a url"), None);
    }
}
