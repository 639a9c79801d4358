//! Field selector sets
//!
//! A `SelectorSet` is the per-shop extraction recipe: for each field an
//! ordered list of selector strings tried first-match-wins. Currency lists
//! may mix markup selectors and bare literal symbols (e.g. `"€"`); the
//! extractor tells them apart by whether the entry parses as a selector.

use serde::{Deserialize, Serialize};

/// Ordered selector lists for the three extracted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Selectors for the price field - multiple fallbacks, first match wins.
    pub price: Vec<String>,
    /// Selectors or literal currency tokens for the currency field.
    pub currency: Vec<String>,
    /// Selectors for the product name field.
    pub name: Vec<String>,
}

impl SelectorSet {
    /// True when no field has any selector configured.
    pub fn is_empty(&self) -> bool {
        self.price.is_empty() && self.currency.is_empty() && self.name.is_empty()
    }
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            price: vec![
                "[itemprop=\"price\"]".to_string(),
                "meta[itemprop=\"price\"]".to_string(),
                "[data-price]".to_string(),
                ".price".to_string(),
                ".product-price".to_string(),
                ".price-value".to_string(),
                "#price".to_string(),
                ".current-price".to_string(),
            ],
            currency: vec![
                "[itemprop=\"priceCurrency\"]".to_string(),
                "meta[itemprop=\"priceCurrency\"]".to_string(),
                ".currency".to_string(),
                ".price-currency".to_string(),
                "€".to_string(),
                "$".to_string(),
                "£".to_string(),
            ],
            name: vec![
                "[itemprop=\"name\"]".to_string(),
                "h1".to_string(),
                ".product-title".to_string(),
                ".product-name".to_string(),
                "#productTitle".to_string(),
            ],
        }
    }
}
