//! Domain services - pure business logic with no infrastructure dependencies

pub mod reconciliation;

pub use reconciliation::ReconciliationEngine;
