//! Document field extraction
//!
//! Runs a shop's `SelectorSet` against raw page markup and returns the raw
//! field strings, first-match-wins per field. Extraction is best-effort by
//! contract: malformed configuration entries are skipped, never raised.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::selector_compiler::{self, CompiledSelector, ParsedSelector};
use crate::domain::selectors::SelectorSet;

/// Machine-readable value attribute preferred over visible text, as used by
/// schema.org-style `<meta itemprop="price" content="...">` markup.
const VALUE_ATTR: &str = "content";

/// One entry of a field's selector list, compiled at construction.
#[derive(Debug, Clone)]
enum FieldSelector {
    /// A markup selector under the minimal grammar.
    Matcher {
        raw: String,
        compiled: CompiledSelector,
    },
    /// Not a selector: kept verbatim as a literal token (currency symbols).
    Literal(String),
}

/// Raw field strings pulled out of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub price: Option<String>,
    pub currency: Option<String>,
    pub name: Option<String>,
}

/// Compiled per-shop extractor over a `SelectorSet`.
pub struct DocumentExtractor {
    price_selectors: Vec<FieldSelector>,
    currency_selectors: Vec<FieldSelector>,
    name_selectors: Vec<FieldSelector>,
}

impl DocumentExtractor {
    pub fn new(selectors: &SelectorSet) -> Self {
        Self {
            price_selectors: compile_field("price", &selectors.price),
            currency_selectors: compile_field("currency", &selectors.currency),
            name_selectors: compile_field("name", &selectors.name),
        }
    }

    /// Extract all three fields from raw markup.
    ///
    /// Price and name accept only markup selectors; non-selector entries in
    /// their lists are skipped. The currency field additionally accepts
    /// literal tokens, matched by substring presence anywhere in the raw
    /// markup, so shop configuration can mix `[itemprop="priceCurrency"]`
    /// and `"€"` in the same list.
    pub fn extract(&self, raw_markup: &str) -> ExtractedFields {
        let document = Html::parse_document(raw_markup);
        ExtractedFields {
            price: extract_field(&document, &self.price_selectors, "price", None),
            currency: extract_field(
                &document,
                &self.currency_selectors,
                "currency",
                Some(raw_markup),
            ),
            name: extract_field(&document, &self.name_selectors, "name", None),
        }
    }
}

/// Malformed entries are dropped up front with a warning; they must read as
/// "no match" in every field, never as literal tokens.
fn compile_field(field: &str, entries: &[String]) -> Vec<FieldSelector> {
    entries
        .iter()
        .filter_map(|entry| match selector_compiler::parse(entry) {
            ParsedSelector::Selector(compiled) => Some(FieldSelector::Matcher {
                raw: entry.clone(),
                compiled,
            }),
            ParsedSelector::NotASelector => Some(FieldSelector::Literal(entry.clone())),
            ParsedSelector::Malformed => {
                warn!(field, selector = %entry, "skipping malformed selector");
                None
            }
        })
        .collect()
}

/// Try each selector in order and stop at the first non-empty value.
fn extract_field(
    document: &Html,
    selectors: &[FieldSelector],
    field: &str,
    literal_haystack: Option<&str>,
) -> Option<String> {
    for (i, entry) in selectors.iter().enumerate() {
        match entry {
            FieldSelector::Matcher { raw, compiled } => {
                if let Some(element) = compiled.select_first(document) {
                    let text = element_value(&element);
                    if !text.is_empty() {
                        debug!(field, selector = %raw, index = i, value = %text, "extracted field");
                        return Some(text);
                    }
                }
            }
            FieldSelector::Literal(token) => match literal_haystack {
                Some(haystack) if !token.is_empty() && haystack.contains(token.as_str()) => {
                    debug!(field, token = %token, index = i, "matched literal token");
                    return Some(token.clone());
                }
                _ => {}
            },
        }
    }
    debug!(field, tried = selectors.len(), "no selector matched");
    None
}

/// Element value: explicit value-carrying attribute first, visible text after.
fn element_value(element: &ElementRef<'_>) -> String {
    if let Some(content) = element.value().attr(VALUE_ATTR) {
        let content = content.trim();
        if !content.is_empty() {
            return content.to_string();
        }
    }
    element.text().collect::<String>().trim().to_string()
}
