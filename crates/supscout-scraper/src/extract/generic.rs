//! Fallback extraction for sources without selector hints.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use supscout_core::Candidate;

use super::links::{element_text, normalize_link, truncate_chars};

/// Upper bound on listings from one page, across all guesses.
pub const MAX_GENERIC_LISTINGS: usize = 50;

const MAX_TITLE_CHARS: usize = 200;

/// Structural guesses tried in order; earlier guesses win when the cap hits.
const GUESSES: &[&str] = &[
    "h2 a",
    ".title a",
    ".product-title a",
    ".company-name a",
    "a.gs-product-card__name",
    ".organic-gallery-title a",
    "h3 a",
    "a",
];

static GUESS_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    GUESSES
        .iter()
        .map(|s| Selector::parse(s).expect("valid generic selector"))
        .collect()
});

pub(super) fn extract(document: &Html, source: &str) -> Vec<Candidate> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::new();

    for selector in GUESS_SELECTORS.iter() {
        for anchor in document.select(selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = element_text(anchor);
            if title.is_empty() {
                continue;
            }
            let Some(link) = normalize_link(href) else {
                continue;
            };
            if !seen.insert((title.clone(), link.clone())) {
                continue;
            }
            out.push(Candidate {
                title: truncate_chars(&title, MAX_TITLE_CHARS),
                link,
                source: source.to_string(),
            });
            if out.len() >= MAX_GENERIC_LISTINGS {
                return out;
            }
        }
    }
    out
}
