//! Price reconciliation engine
//!
//! Given every stored observation for one (shop, product) pair, pick the
//! single most trustworthy reading. Pure function of the observation list and
//! an explicit `now`: no storage access, no hidden state, so the whole policy
//! is unit-testable with literal input lists.
//!
//! The result is always one of the input observations, never a synthesized
//! value — every canonical price stays auditable back to a concrete reading.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::currency;
use crate::domain::observation::{Observation, ObservationSource, ReconciledPrice};

/// Weight of source trust in the candidate score.
const TRUST_WEIGHT: f64 = 100.0;
/// Weight of freshness decay in the candidate score.
const FRESHNESS_WEIGHT: f64 = 50.0;
/// Penalty weight applied to price outliers.
const ANOMALY_WEIGHT: f64 = 80.0;

/// Freshness floor for readings strictly past their source max age: heavily
/// discounted but still usable as a last resort.
const STALE_FRESHNESS_FLOOR: f64 = 0.1;

/// Candidates below `median * ANOMALY_LOW` or above `median * ANOMALY_HIGH`
/// are treated as likely parse errors or genuine outliers.
const ANOMALY_LOW: f64 = 0.4;
const ANOMALY_HIGH: f64 = 1.6;

/// Stateless scoring engine for price observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Reconcile all observations for one (shop, product) pair into the
    /// single canonical reading, or `None` when nothing usable exists.
    ///
    /// Deterministic in `observations` and `now`; callers that need
    /// idempotence across calls pass a frozen clock.
    pub fn reconcile(
        &self,
        observations: &[Observation],
        now: DateTime<Utc>,
    ) -> Option<ReconciledPrice> {
        let valid: Vec<&Observation> = observations.iter().filter(|o| o.is_valid()).collect();
        if valid.is_empty() {
            debug!(
                total = observations.len(),
                "no valid observations to reconcile"
            );
            return None;
        }

        let candidates = dominant_currency_group(&valid);
        let pool = preferred_pool(&candidates, now);
        let median = median_price(&pool);

        let mut winner: Option<(&Observation, f64)> = None;
        for &obs in &pool {
            let score = score(obs, median, now);
            debug!(
                source = obs.source.as_str(),
                price = obs.price,
                currency = %obs.currency,
                age_hours = obs.age_hours(now),
                score,
                "scored candidate"
            );
            winner = match winner {
                None => Some((obs, score)),
                Some((best, best_score)) => {
                    if score > best_score || (score == best_score && obs.price < best.price) {
                        Some((obs, score))
                    } else {
                        Some((best, best_score))
                    }
                }
            };
        }

        winner.map(|(obs, _)| obs.clone())
    }
}

/// Keep only the most frequent currency group, preferring EUR on an exact tie
/// with the leader. Falls back to the full set if filtering would empty it.
fn dominant_currency_group<'a>(valid: &[&'a Observation]) -> Vec<&'a Observation> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for obs in valid {
        *counts.entry(currency::normalize(&obs.currency)).or_default() += 1;
    }

    let top = counts.values().copied().max().unwrap_or(0);
    let mut leaders: Vec<&str> = counts
        .iter()
        .filter(|(_, &n)| n == top)
        .map(|(code, _)| code.as_str())
        .collect();
    leaders.sort_unstable();
    let winning = if leaders.contains(&"EUR") {
        "EUR".to_string()
    } else {
        leaders.first().map(|s| s.to_string()).unwrap_or_default()
    };

    debug!(currency = %winning, group_size = top, "dominant currency group");

    let group: Vec<&Observation> = valid
        .iter()
        .copied()
        .filter(|o| currency::normalize(&o.currency) == winning)
        .collect();
    if group.is_empty() {
        valid.to_vec()
    } else {
        group
    }
}

/// Restrict to fresh live-extension readings when any exist, else fresh
/// live-webview readings, else keep everything. A live observation must never
/// be silently overridden by a stale catalog crawl.
fn preferred_pool<'a>(candidates: &[&'a Observation], now: DateTime<Utc>) -> Vec<&'a Observation> {
    for source in [
        ObservationSource::LiveExtension,
        ObservationSource::LiveWebview,
    ] {
        let fresh: Vec<&Observation> = candidates
            .iter()
            .copied()
            .filter(|o| o.source == source && o.is_fresh(now))
            .collect();
        if !fresh.is_empty() {
            debug!(
                source = source.as_str(),
                pool_size = fresh.len(),
                "restricting to fresh live pool"
            );
            return fresh;
        }
    }
    candidates.to_vec()
}

/// Median of the pool's prices; the anomaly baseline.
fn median_price(pool: &[&Observation]) -> f64 {
    let mut prices: Vec<f64> = pool.iter().map(|o| o.price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));
    let mid = prices.len() / 2;
    if prices.len() % 2 == 1 {
        prices[mid]
    } else {
        (prices[mid - 1] + prices[mid]) / 2.0
    }
}

fn score(obs: &Observation, median: f64, now: DateTime<Utc>) -> f64 {
    let trust = obs.source.trust();
    let freshness = freshness(obs, now);
    let anomaly = if median > 0.0 {
        let ratio = obs.price / median;
        if ratio < ANOMALY_LOW || ratio > ANOMALY_HIGH {
            1.0
        } else {
            0.0
        }
    } else {
        0.0
    };
    trust * TRUST_WEIGHT + freshness * FRESHNESS_WEIGHT - anomaly * ANOMALY_WEIGHT
}

/// Linear decay to zero over the source max age; strictly past max age the
/// reading keeps a small floor instead of dropping to zero.
fn freshness(obs: &Observation, now: DateTime<Utc>) -> f64 {
    let age = obs.age_hours(now);
    let max_age = obs.source.max_age_hours();
    if age > max_age {
        STALE_FRESHNESS_FLOOR
    } else {
        1.0 - (age / max_age).min(1.0)
    }
}
