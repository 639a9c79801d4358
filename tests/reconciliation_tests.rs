//! Reconciliation engine properties over literal observation lists.

use chrono::{DateTime, Duration, Utc};

use priceguard::domain::{Observation, ObservationSource, ReconciliationEngine};

fn obs(
    source: ObservationSource,
    price: f64,
    currency: &str,
    minutes_old: i64,
    now: DateTime<Utc>,
) -> Observation {
    Observation::new(
        source,
        "shop.example",
        "https://shop.example/p/42",
        price,
        currency,
        now - Duration::minutes(minutes_old),
    )
    .unwrap()
}

#[test]
fn live_extension_overrides_cheaper_stale_crawl() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    // 5-minute-old extension reading at 100 EUR vs a 20-hour-old crawl at
    // 80 EUR: the live reading wins even though it is more expensive.
    let extension = obs(ObservationSource::LiveExtension, 100.0, "EUR", 5, now);
    let crawler = obs(ObservationSource::BackgroundCrawler, 80.0, "EUR", 20 * 60, now);

    let winner = engine
        .reconcile(&[crawler, extension.clone()], now)
        .unwrap();
    assert_eq!(winner, extension);
}

#[test]
fn parsing_error_outlier_is_excluded() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    let readings = vec![
        obs(ObservationSource::BackgroundCrawler, 199.0, "EUR", 120, now),
        obs(ObservationSource::BackgroundCrawler, 205.0, "EUR", 180, now),
        // Decimal shifted two places by a bad parse: a clear outlier.
        obs(ObservationSource::BackgroundCrawler, 1.99, "EUR", 30, now),
    ];

    let winner = engine.reconcile(&readings, now).unwrap();
    assert!(winner.price > 100.0, "outlier 1.99 must never win");
}

#[test]
fn currency_dominance_restricts_to_majority_group() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    let readings = vec![
        obs(ObservationSource::BackgroundCrawler, 50.0, "EUR", 300, now),
        obs(ObservationSource::BackgroundCrawler, 52.0, "EUR", 400, now),
        obs(ObservationSource::LiveExtension, 48.0, "USD", 5, now),
    ];

    let winner = engine.reconcile(&readings, now).unwrap();
    assert_eq!(winner.currency, "EUR");
}

#[test]
fn exact_score_tie_goes_to_the_cheaper_price() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    // Same source, same age, both within the anomaly band: identical scores.
    let cheap = obs(ObservationSource::LiveWebview, 90.0, "EUR", 45, now);
    let pricey = obs(ObservationSource::LiveWebview, 110.0, "EUR", 45, now);

    let winner = engine.reconcile(&[pricey, cheap.clone()], now).unwrap();
    assert_eq!(winner, cheap);
}

#[test]
fn frozen_clock_makes_reconciliation_idempotent() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    let readings = vec![
        obs(ObservationSource::LiveExtension, 100.0, "EUR", 30, now),
        obs(ObservationSource::LiveWebview, 98.0, "EUR", 90, now),
        obs(ObservationSource::BackgroundCrawler, 95.0, "EUR", 500, now),
        obs(ObservationSource::BackgroundCrawler, 97.0, "USD", 45, now),
    ];

    let first = engine.reconcile(&readings, now);
    let second = engine.reconcile(&readings, now);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn empty_and_all_invalid_inputs_yield_absence() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();
    assert_eq!(engine.reconcile(&[], now), None);

    let mut corrupted = obs(ObservationSource::LiveWebview, 10.0, "EUR", 5, now);
    corrupted.currency.clear();
    assert_eq!(engine.reconcile(&[corrupted], now), None);
}

#[test]
fn winner_is_returned_unchanged() {
    let now = Utc::now();
    let engine = ReconciliationEngine::new();

    let readings = vec![
        obs(ObservationSource::LiveWebview, 60.0, "EUR", 30, now),
        obs(ObservationSource::BackgroundCrawler, 58.0, "EUR", 600, now),
    ];

    let winner = engine.reconcile(&readings, now).unwrap();
    assert!(
        readings.contains(&winner),
        "the engine never synthesizes a new observation"
    );
}
