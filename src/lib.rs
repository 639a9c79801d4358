//! priceguard - multi-source price observation extraction and reconciliation
//!
//! The platform watches product prices through three heterogeneous, untrusted
//! channels: a browser extension on the live page, an in-app web view, and a
//! periodic background crawler. This crate owns the two parts of that system
//! with real correctness risk:
//!
//! - the **extraction pipeline**: selector-based field extraction from raw
//!   markup, locale-ambiguous numeric parsing, currency normalization;
//! - the **reconciliation engine**: source trust, freshness decay, anomaly
//!   detection, currency-group dominance, deterministic tie-break, producing
//!   one canonical price per (shop, product) pair.
//!
//! Fetching pages, scheduling crawls, persistence, and caching live behind
//! the narrow traits in [`domain::repositories`]; the core itself is pure,
//! synchronous, and side-effect free.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CanonicalPriceService, ObservationCaptureService};
pub use domain::{
    Observation, ObservationSource, ReconciledPrice, ReconciliationEngine, SelectorSet,
};
