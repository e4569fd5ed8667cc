//! Query normalization and encoding.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Russian material stems mapped to the English trade term most directories
/// index. Checked in order; the first stem contained in the query wins.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("фиброцем", "fiber cement panels"),
    ("пенобетон", "foam concrete"),
    ("лстк", "light gauge steel frame"),
    ("сэндвич", "sandwich panels"),
    ("оцинкован", "galvanized steel"),
    ("алюкобонд", "aluminum composite panel"),
];

/// Characters left unescaped in a URI component (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn has_cyrillic(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, 'А'..='я' | 'Ё' | 'ё'))
}

/// Translate a Cyrillic query to its English trade term when a known stem
/// matches; otherwise return the query unchanged.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    if has_cyrillic(query) {
        let lower = query.to_lowercase();
        if let Some((_, english)) = TRANSLATIONS.iter().find(|(stem, _)| lower.contains(stem)) {
            return (*english).to_string();
        }
    }
    query.to_string()
}

/// Percent-encode a query for substitution into a URL template.
#[must_use]
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, URI_COMPONENT).to_string()
}
