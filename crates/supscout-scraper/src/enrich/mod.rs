//! Candidate enrichment: visit each listing's page, filter out logistics
//! intermediaries and traders, scrape contacts and rate what is left.

pub mod filter;
pub mod probes;

use supscout_core::{Candidate, EnrichedSupplier};

use crate::extract::links::truncate_chars;
use crate::fetch::Fetcher;
use crate::score::TrustSignals;

pub use filter::{is_banned, manufacturer_confidence, MIN_MANUFACTURER_CONFIDENCE};
pub use probes::extract_contacts;

/// Enrichment stops once this many suppliers have been accepted.
pub const MAX_ENRICHED: usize = 40;

const MAX_NAME_CHARS: usize = 140;

/// Enrich candidates in input order, one page fetch at a time.
///
/// A candidate is skipped when its title or link is empty, when its title
/// or page mentions a banned logistics term, or when its page's
/// manufacturer confidence is below [`MIN_MANUFACTURER_CONFIDENCE`]. A
/// failed fetch is treated as an empty page. Stops after [`MAX_ENRICHED`]
/// accepted suppliers.
pub async fn enrich<F: Fetcher>(fetcher: &F, candidates: &[Candidate]) -> Vec<EnrichedSupplier> {
    let mut enriched = Vec::new();

    for candidate in candidates {
        if enriched.len() >= MAX_ENRICHED {
            break;
        }
        if candidate.title.is_empty() || candidate.link.is_empty() {
            continue;
        }
        if is_banned(&candidate.title) {
            tracing::debug!(title = %candidate.title, "skipping banned listing");
            continue;
        }

        let markup = fetcher.fetch(&candidate.link).await.into_markup();
        if is_banned(&markup) {
            tracing::debug!(link = %candidate.link, "skipping page with logistics content");
            continue;
        }

        let confidence = manufacturer_confidence(&markup);
        if confidence < MIN_MANUFACTURER_CONFIDENCE {
            tracing::debug!(link = %candidate.link, confidence, "skipping likely intermediary");
            continue;
        }

        enriched.push(build_supplier(candidate, &markup, confidence));
    }

    tracing::info!(
        candidates = candidates.len(),
        accepted = enriched.len(),
        "enrichment finished"
    );
    enriched
}

/// Assemble and rate one accepted supplier. Kept synchronous so the parsed
/// document never lives across an await point.
fn build_supplier(candidate: &Candidate, markup: &str, confidence: f64) -> EnrichedSupplier {
    let contacts = extract_contacts(markup, &candidate.link);
    let rating = TrustSignals::from_page(markup, &contacts, &candidate.link, confidence).rating();
    let name = truncate_chars(&candidate.title, MAX_NAME_CHARS);
    let source = if candidate.source.is_empty() {
        "-".to_string()
    } else {
        candidate.source.clone()
    };

    EnrichedSupplier {
        company_name: name.clone(),
        region: contacts.region.clone(),
        product: name,
        price: contacts.price.clone(),
        moq: contacts.moq.clone(),
        certificates: contacts.certificates.clone(),
        image_link: contacts.image_link.clone(),
        rating,
        source,
        website: candidate.link.clone(),
        contacts,
    }
}
