//! Price observation entities
//!
//! An observation is one price reading for a (shop, product) pair as seen by
//! one of the three collection channels. Observations are immutable and
//! append-only: a newer reading supersedes an older one, it never updates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::currency;

/// Longest raw currency string accepted before normalization.
pub const MAX_CURRENCY_LEN: usize = 10;

/// The channel that produced an observation.
///
/// Closed set on purpose: the trust and max-age tables below are exhaustive
/// matches, so adding a source is a compile-time event, not a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationSource {
    /// Browser extension watching the live product page.
    LiveExtension,
    /// In-app web view rendering the product page.
    LiveWebview,
    /// Periodic background catalog crawler.
    BackgroundCrawler,
}

impl ObservationSource {
    /// How directly this source observed the real page, in [0, 1].
    pub fn trust(self) -> f64 {
        match self {
            Self::LiveExtension => 1.00,
            Self::LiveWebview => 0.85,
            Self::BackgroundCrawler => 0.65,
        }
    }

    /// Age beyond which a reading from this source is considered stale.
    pub fn max_age_hours(self) -> f64 {
        match self {
            Self::LiveExtension => 1.0,
            Self::LiveWebview => 6.0,
            Self::BackgroundCrawler => 24.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LiveExtension => "live-extension",
            Self::LiveWebview => "live-webview",
            Self::BackgroundCrawler => "background-crawler",
        }
    }
}

/// One price reading for a (shop, product) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub source: ObservationSource,
    pub shop_domain: String,
    pub product_url: String,
    /// Positive decimal price in `currency`.
    pub price: f64,
    /// Canonical 3-letter currency code (normalized at construction).
    pub currency: String,
    #[serde(rename = "observedAt")]
    pub observed_at: DateTime<Utc>,
}

/// The reconciliation engine's output.
///
/// Always one of the actual input observations, never a synthesized value —
/// that keeps every canonical price auditable back to a concrete reading.
pub type ReconciledPrice = Observation;

impl Observation {
    /// Build a validated observation. Returns `None` when the reading is
    /// unusable: non-positive price, or an empty/over-long currency string.
    pub fn new(
        source: ObservationSource,
        shop_domain: impl Into<String>,
        product_url: impl Into<String>,
        price: f64,
        raw_currency: &str,
        observed_at: DateTime<Utc>,
    ) -> Option<Self> {
        let raw_currency = raw_currency.trim();
        if price <= 0.0 || !price.is_finite() {
            return None;
        }
        if raw_currency.is_empty() || raw_currency.chars().count() > MAX_CURRENCY_LEN {
            return None;
        }
        Some(Self {
            source,
            shop_domain: shop_domain.into(),
            product_url: product_url.into(),
            price,
            currency: currency::normalize(raw_currency),
            observed_at,
        })
    }

    /// Whether a stored observation still satisfies the construction
    /// invariants. Stores are untrusted, so the engine re-checks.
    pub fn is_valid(&self) -> bool {
        self.price > 0.0
            && self.price.is_finite()
            && !self.currency.is_empty()
            && self.currency.chars().count() <= MAX_CURRENCY_LEN
    }

    /// Age of this reading relative to `now`, in fractional hours.
    /// Readings from the future count as age zero.
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.observed_at).num_milliseconds() as f64 / 1000.0;
        (secs / 3600.0).max(0.0)
    }

    /// Fresh means within the per-source max age.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age_hours(now) <= self.source.max_age_hours()
    }
}
