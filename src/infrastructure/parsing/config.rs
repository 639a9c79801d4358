//! Selector configuration for field extraction
//!
//! Per-shop selector sets plus the process-wide default used when a shop has
//! no specific configuration. Loaded once (typically from JSON) at startup or
//! config refresh, immutable afterwards, and injected into the services that
//! need it - extraction never reaches into global state.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::repositories::SelectorProvider;
use crate::domain::selectors::SelectorSet;

/// Process-wide default selector set, shared by every provider.
static DEFAULT_SELECTORS: Lazy<SelectorSet> = Lazy::new(SelectorSet::default);

/// Read-only selector configuration for all known shops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopSelectorConfig {
    /// Shop-specific selector sets, keyed by shop domain.
    #[serde(default)]
    pub shops: HashMap<String, SelectorSet>,

    /// Fallback set for shops without specific configuration. Empty fields
    /// fall back further to the hard-coded process default.
    #[serde(default)]
    pub default: Option<SelectorSet>,
}

impl ShopSelectorConfig {
    /// Load configuration from a JSON document.
    ///
    /// ```json
    /// {
    ///   "shops": {
    ///     "shop.example": { "price": [".price"], "currency": ["€"], "name": ["h1"] }
    ///   },
    ///   "default": { "price": [".price"], "currency": ["€"], "name": ["h1"] }
    /// }
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl SelectorProvider for ShopSelectorConfig {
    fn selectors_for(&self, shop_domain: &str) -> SelectorSet {
        if let Some(set) = self.shops.get(shop_domain) {
            if !set.is_empty() {
                debug!(shop = shop_domain, "using shop-specific selectors");
                return set.clone();
            }
        }
        if let Some(default) = &self.default {
            if !default.is_empty() {
                debug!(shop = shop_domain, "using configured default selectors");
                return default.clone();
            }
        }
        debug!(shop = shop_domain, "using process default selectors");
        DEFAULT_SELECTORS.clone()
    }
}
