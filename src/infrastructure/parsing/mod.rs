//! Price observation extraction pipeline
//!
//! Turns raw page markup plus a shop's selector configuration into raw field
//! strings and normalized values. Everything in here is pure and best-effort:
//! bad configuration is skipped, missing fields come back as `None`, and no
//! function panics on untrusted markup.

pub mod config;
pub mod error;
pub mod extractor;
pub mod price;
pub mod selector_compiler;

pub use config::ShopSelectorConfig;
pub use error::{ExtractionError, ExtractionResult};
pub use extractor::{DocumentExtractor, ExtractedFields};
pub use price::normalize_price;
pub use selector_compiler::{compile, parse, CompiledSelector, ParsedSelector};
