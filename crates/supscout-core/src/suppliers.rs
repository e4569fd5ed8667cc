//! Records passed between the collection, enrichment and ranking stages.

use serde::{Deserialize, Serialize};

/// An unenriched listing pulled from one source's result page.
///
/// `link` is always an absolute `http(s)` URL; extraction drops anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub link: String,
    /// Display name of the registry source that produced the listing.
    pub source: String,
}

/// Contact and trade fields scraped from a candidate's own page.
///
/// Every field is filled independently; `None` means the page gave no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub telegram: Option<String>,
    pub wechat: Option<String>,
    pub region: Option<String>,
    pub price: Option<String>,
    pub moq: Option<String>,
    /// Distinct certificate keywords joined with `"; "`, at most ten.
    pub certificates: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
}

impl Contacts {
    #[must_use]
    pub fn has_certificates(&self) -> bool {
        self.certificates.is_some()
    }

    #[must_use]
    pub fn has_price_and_moq(&self) -> bool {
        self.price.is_some() && self.moq.is_some()
    }
}

/// A candidate that survived filtering, with its trade data and trust rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSupplier {
    /// Listing title, at most 140 characters.
    pub company_name: String,
    pub region: Option<String>,
    /// Listing title, at most 140 characters.
    pub product: String,
    pub price: Option<String>,
    pub moq: Option<String>,
    pub certificates: Option<String>,
    pub contacts: Contacts,
    /// Trust rating in `0..=100`.
    pub rating: u8,
    pub source: String,
    /// The candidate page URL; never empty.
    pub website: String,
    pub image_link: Option<String>,
}
