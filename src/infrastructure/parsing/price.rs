//! Numeric price normalization
//!
//! Turns extracted price text ("1.234,56 €", "$ 1,234.56", "1 299,00") into a
//! decimal value. Thousands/decimal separator ambiguity is resolved by a
//! last-separator-wins heuristic: whichever of `,` / `.` occurs last in the
//! digit run is the decimal separator, the other is grouping and is removed.
//!
//! This is an ambiguity-resolving policy, not locale awareness: a lone comma
//! is always read as a decimal separator, which is wrong for some locales.
//! Kept as-is for compatibility with the data already flowing through the
//! platform; a per-shop locale hint would be needed to do better.

use once_cell::sync::Lazy;
use regex::Regex;

/// First maximal run of digits, spaces, commas, and dots.
static PRICE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d\s.,]*").expect("valid regex"));

/// Parse raw price text into a positive decimal value.
///
/// Returns `None` when no digit run exists, the run carries a leading minus
/// sign, or the resolved number is not strictly positive. Total: never
/// panics on any input.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let matched = PRICE_RUN.find(raw)?;
    // A digit run immediately preceded by a minus sign is a negative price;
    // the run itself starts at the first digit, so look one byte back.
    if raw[..matched.start()].ends_with('-') {
        return None;
    }
    let run = matched.as_str();

    // Plain spaces and NBSP are thousands separators in some locales.
    let digits: String = run
        .chars()
        .filter(|&c| c != ' ' && c != '\u{00A0}')
        .collect();

    let resolved = match (digits.rfind(','), digits.rfind('.')) {
        // Both present: the one occurring last is the decimal separator.
        (Some(comma), Some(dot)) if comma > dot => {
            decimal_from_last(&digits.replace('.', ""), ',')
        }
        (Some(_), Some(_)) => digits.replace(',', ""),
        // Only commas: the last one is the decimal separator.
        (Some(_), None) => decimal_from_last(&digits, ','),
        // Several dots: same rule, earlier ones are grouping.
        (None, Some(_)) if digits.matches('.').count() > 1 => decimal_from_last(&digits, '.'),
        // Single dot or plain integer: already standard notation.
        _ => digits,
    };

    let cleaned: String = resolved
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() || cleaned == "." {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    (value > 0.0).then_some(value)
}

/// Keep the last occurrence of `sep` as the decimal dot, drop the rest.
fn decimal_from_last(digits: &str, sep: char) -> String {
    let last = match digits.rfind(sep) {
        Some(pos) => pos,
        None => return digits.to_string(),
    };
    let mut out = String::with_capacity(digits.len());
    for (pos, c) in digits.char_indices() {
        if c == sep {
            if pos == last {
                out.push('.');
            }
        } else {
            out.push(c);
        }
    }
    out
}
