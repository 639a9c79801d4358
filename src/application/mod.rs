//! Application layer - services coordinating domain logic and collaborators
//!
//! The write side (capture an observation from raw markup) and the read side
//! (compute and memoize the canonical price).

pub mod canonical_price_service;
pub mod observation_service;

pub use canonical_price_service::CanonicalPriceService;
pub use observation_service::{shop_domain_for, CaptureOutcome, ObservationCaptureService};
