//! Domain module - core business entities and logic
//!
//! Observations, selector sets, the collaborator contracts, and the pure
//! reconciliation engine. Nothing in here performs IO.

pub mod currency;
pub mod observation;
pub mod repositories;
pub mod selectors;
pub mod services;

pub use observation::{Observation, ObservationSource, ReconciledPrice};
pub use selectors::SelectorSet;
pub use services::ReconciliationEngine;
