//! Infrastructure module - extraction pipeline and reference collaborators
//!
//! The parsing pipeline (selector compiler, document extractor, numeric
//! normalizer, selector configuration) plus in-memory implementations of the
//! store/cache contracts and logging setup.

pub mod logging;
pub mod memory;
pub mod parsing;

pub use memory::{InMemoryCache, InMemoryObservationStore, NoopCache};
pub use parsing::{
    DocumentExtractor, ExtractedFields, ExtractionError, ExtractionResult, ShopSelectorConfig,
};
