//! Listing extraction from a source's result page.
//!
//! Sources with a [`FieldHint`] use their own selectors ([`hinted`]); every
//! other source goes through a fixed ladder of structural guesses
//! ([`generic`]). Neither strategy can fail: unparseable or unfamiliar
//! markup simply yields no listings.

mod generic;
mod hinted;
pub(crate) mod links;

use scraper::Html;
use supscout_core::Candidate;

use crate::registry::FieldHint;

pub use generic::MAX_GENERIC_LISTINGS;
pub use hinted::MAX_HINTED_LISTINGS;

/// What extraction made of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The page was empty (or the fetch missed), nothing was parsed.
    NoMarkup,
    /// Markup was parsed but no selector produced a usable listing.
    NoMatch,
    Found(Vec<Candidate>),
}

impl Extraction {
    #[must_use]
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            Extraction::Found(candidates) => candidates,
            Extraction::NoMarkup | Extraction::NoMatch => Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Extraction::Found(candidates) => candidates.len(),
            Extraction::NoMarkup | Extraction::NoMatch => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extract up to 50 listings (5 with hints) from `markup` for `source`.
#[must_use]
pub fn extract_listings(markup: &str, source: &str, hints: Option<&[FieldHint]>) -> Extraction {
    if markup.trim().is_empty() {
        return Extraction::NoMarkup;
    }

    let document = Html::parse_document(markup);
    let candidates = match hints {
        Some(hints) if !hints.is_empty() => hinted::extract(&document, hints, source),
        _ => generic::extract(&document, source),
    };

    if candidates.is_empty() {
        Extraction::NoMatch
    } else {
        Extraction::Found(candidates)
    }
}
