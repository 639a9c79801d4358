//! Minimal field-selector compiler
//!
//! Shop extraction configuration uses a small declarative selector form: an
//! optional tag name followed by any combination of `.class`, `#id`,
//! `[attr]` and `[attr="value"]` conditions, all AND-ed against a single
//! element. No descendant or combinator support.
//!
//! `parse` classifies every configured string three ways: a valid selector,
//! malformed selector syntax (selector-shaped but broken, e.g. an
//! unterminated `[`), or not a selector at all. The distinction is
//! load-bearing: currency selector lists may contain bare literal tokens
//! like `"€"` which the extractor matches as substrings, while malformed
//! entries are plain configuration mistakes and must only ever mean
//! "no match" — never a literal. Classification never raises on bad
//! configuration.

use scraper::{ElementRef, Html};

/// One attribute condition of a compiled selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    /// `[attr]` - the attribute must be present.
    Exists(String),
    /// `[attr="value"]` - the attribute must equal the value exactly.
    Equals(String, String),
}

/// A compiled single-element matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl CompiledSelector {
    /// Whether `element` satisfies every condition of this selector.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if let Some(tag) = &self.tag {
            if !value.name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if value.id() != Some(id.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            if !value.classes().any(|c| c == class) {
                return false;
            }
        }
        for attr in &self.attrs {
            match attr {
                AttrCondition::Exists(name) => {
                    if value.attr(name).is_none() {
                        return false;
                    }
                }
                AttrCondition::Equals(name, expected) => {
                    if value.attr(name) != Some(expected.as_str()) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// First matching element in document order, if any.
    pub fn select_first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| self.matches(el))
    }
}

/// Classification of one configured selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSelector {
    /// Valid under the minimal grammar.
    Selector(CompiledSelector),
    /// Selector-shaped (contains `.`, `#`, or `[`) but syntactically broken.
    /// Treated as "no match" in every field, never as a literal.
    Malformed,
    /// Not a selector at all, e.g. a bare currency symbol. Fields that allow
    /// it treat the string as a literal token.
    NotASelector,
}

/// Classify a configured selector string.
pub fn parse(input: &str) -> ParsedSelector {
    match compile(input) {
        Some(selector) => ParsedSelector::Selector(selector),
        None if input.chars().any(|c| matches!(c, '.' | '#' | '[')) => ParsedSelector::Malformed,
        None => ParsedSelector::NotASelector,
    }
}

/// Compile a selector string, or `None` when it does not match the grammar.
///
/// A valid selector consumes the entire input and carries at least one
/// condition (a bare tag name counts).
pub fn compile(input: &str) -> Option<CompiledSelector> {
    let mut scanner = Scanner::new(input.trim());
    if scanner.is_done() {
        return None;
    }

    let mut selector = CompiledSelector {
        tag: None,
        id: None,
        classes: Vec::new(),
        attrs: Vec::new(),
    };

    // Optional leading tag name.
    if let Some(tag) = scanner.take_ident() {
        selector.tag = Some(tag.to_ascii_lowercase());
    }

    while !scanner.is_done() {
        match scanner.peek()? {
            '.' => {
                scanner.bump();
                selector.classes.push(scanner.take_ident()?);
            }
            '#' => {
                scanner.bump();
                selector.id = Some(scanner.take_ident()?);
            }
            '[' => {
                scanner.bump();
                let name = scanner.take_ident()?.to_ascii_lowercase();
                match scanner.peek()? {
                    ']' => {
                        scanner.bump();
                        selector.attrs.push(AttrCondition::Exists(name));
                    }
                    '=' => {
                        scanner.bump();
                        let value = scanner.take_attr_value()?;
                        if scanner.peek()? != ']' {
                            return None;
                        }
                        scanner.bump();
                        selector.attrs.push(AttrCondition::Equals(name, value));
                    }
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    let has_condition = selector.tag.is_some()
        || selector.id.is_some()
        || !selector.classes.is_empty()
        || !selector.attrs.is_empty();
    has_condition.then_some(selector)
}

/// Character scanner over a selector string.
struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn is_done(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) {
        self.chars.next();
    }

    /// `[A-Za-z_][A-Za-z0-9_-]*`, or `None` if the next char cannot start one.
    fn take_ident(&mut self) -> Option<String> {
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Some(ident)
    }

    /// Attribute value: single-quoted, double-quoted, or unquoted up to `]`.
    fn take_attr_value(&mut self) -> Option<String> {
        let mut value = String::new();
        match self.peek()? {
            quote @ ('"' | '\'') => {
                self.bump();
                loop {
                    let c = self.peek()?;
                    self.bump();
                    if c == quote {
                        break;
                    }
                    value.push(c);
                }
            }
            _ => {
                while let Some(c) = self.peek() {
                    if c == ']' {
                        break;
                    }
                    value.push(c);
                    self.bump();
                }
            }
        }
        Some(value)
    }
}
