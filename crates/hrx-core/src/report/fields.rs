//! Catalog-driven field extraction.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::rules::{self, FieldKind};

/// Raw matched substrings keyed by field kind. Built fresh per document;
/// a field with no match has no key.
pub type RawFieldMap = BTreeMap<FieldKind, String>;

/// Collapse every line-break run into a single space.
///
/// Report generators wrap label/value pairs at arbitrary widths, so field
/// patterns run over a single-line view of the document.
pub fn normalize_line_breaks(text: &str) -> String {
    rules::patterns::LINE_BREAKS.replace_all(text, " ").into_owned()
}

/// Runs the rule catalog over a document and collects raw matches.
///
/// Each rule searches the whole normalized text independently for its first
/// match and writes to its own key, so catalog order never changes the
/// outcome. Matched substrings are kept unconverted; conversion happens in
/// the record builder, which keeps "found but unconvertible" distinguishable
/// from "not found".
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract raw field values from report text.
    pub fn extract(&self, text: &str) -> RawFieldMap {
        let normalized = normalize_line_breaks(text);
        let mut raw = RawFieldMap::new();

        for rule in rules::rules() {
            match rule.pattern.captures(&normalized) {
                Some(caps) => {
                    let value = caps[1].trim().to_string();
                    trace!(field = rule.kind.name(), value = %value, "field matched");
                    raw.insert(rule.kind, value);
                }
                None => {
                    trace!(field = rule.kind.name(), "no match");
                }
            }
        }

        debug!(
            "extracted {} of {} catalog fields",
            raw.len(),
            rules::rules().len()
        );
        raw
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
