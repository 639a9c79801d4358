//! Currency normalization
//!
//! Maps the symbols and codes seen in page markup to canonical 3-letter
//! codes. Shared by the extraction pipeline and the reconciliation engine so
//! both sides agree on what "the same currency" means.

/// Normalize a raw currency token to a canonical code.
///
/// Known symbols map to their ISO code; anything else is returned trimmed and
/// uppercased unchanged — observation validation decides whether to keep it.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "€" => "EUR".to_string(),
        "$" => "USD".to_string(),
        "£" => "GBP".to_string(),
        other => other.to_uppercase(),
    }
}
