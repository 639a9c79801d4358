//! Extraction error types
//!
//! Covers the expected failure modes of the capture pipeline. None of these
//! indicate a fault in the system: a page without a recognizable price is a
//! normal outcome the caller decides how to handle (typically by falling back
//! to another data source).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no price found for {product_url}")]
    NoPriceFound {
        product_url: String,
        /// Raw price text that failed numeric normalization, if any matched.
        raw_text: Option<String>,
    },

    #[error("no currency found for {product_url}")]
    NoCurrencyFound { product_url: String },

    #[error("extracted values do not form a valid observation: {reason}")]
    InvalidObservation { reason: String },
}

impl ExtractionError {
    pub fn no_price_found(product_url: &str, raw_text: Option<&str>) -> Self {
        Self::NoPriceFound {
            product_url: product_url.to_string(),
            raw_text: raw_text.map(|s| s.to_string()),
        }
    }

    pub fn no_currency_found(product_url: &str) -> Self {
        Self::NoCurrencyFound {
            product_url: product_url.to_string(),
        }
    }

    pub fn invalid_observation(reason: &str) -> Self {
        Self::InvalidObservation {
            reason: reason.to_string(),
        }
    }

    /// All extraction failures are recoverable by falling back to another
    /// data source; the distinction matters to callers that retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NoPriceFound { .. } => true,
            Self::NoCurrencyFound { .. } => true,
            Self::InvalidObservation { .. } => false,
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
