//! Multi-source collection with chunked fan-out.

use std::collections::HashSet;

use futures::future::join_all;
use supscout_core::Candidate;

use crate::extract::{extract_listings, Extraction};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::query::{encode_query, normalize_query};
use crate::registry::{Source, SourceRegistry};

/// Sources fetched concurrently per chunk; bounds in-flight requests.
pub const CHUNK_SIZE: usize = 10;

/// Cap on merged candidates; reaching it stops further chunks.
pub const MAX_CANDIDATES: usize = 500;

/// Query every registered source and return the merged, link-deduplicated
/// candidate list (at most [`MAX_CANDIDATES`]).
///
/// Sources are processed in registry order, [`CHUNK_SIZE`] at a time; each
/// chunk runs concurrently and completes before the next one starts. A source
/// that misses or yields nothing contributes an empty batch and never stops
/// the others.
pub async fn collect<F: Fetcher>(
    fetcher: &F,
    registry: &SourceRegistry,
    query: &str,
) -> Vec<Candidate> {
    let normalized = normalize_query(query);
    if normalized != query {
        tracing::debug!(query, normalized = %normalized, "translated query");
    }
    let encoded = encode_query(&normalized);

    let mut merged: Vec<Candidate> = Vec::new();
    for (chunk_index, chunk) in registry.sources().chunks(CHUNK_SIZE).enumerate() {
        let batches = join_all(
            chunk
                .iter()
                .map(|source| collect_source(fetcher, registry, source, &encoded)),
        )
        .await;

        for batch in batches {
            merged.extend(batch);
        }
        tracing::debug!(chunk = chunk_index, merged = merged.len(), "chunk complete");

        if merged.len() >= MAX_CANDIDATES {
            tracing::debug!(chunk = chunk_index, "candidate cap reached; skipping remaining sources");
            break;
        }
    }

    let unique = dedup_by_link(merged);
    tracing::info!(query, candidates = unique.len(), "collection finished");
    unique
}

async fn collect_source<F: Fetcher>(
    fetcher: &F,
    registry: &SourceRegistry,
    source: &Source,
    encoded_query: &str,
) -> Vec<Candidate> {
    let url = source.locator(encoded_query);
    let markup = match fetcher.fetch(&url).await {
        FetchOutcome::Page(markup) => markup,
        FetchOutcome::Miss(miss) => {
            tracing::debug!(source = %source.name, %miss, "source unavailable");
            return Vec::new();
        }
    };

    let extraction = extract_listings(&markup, &source.name, registry.hints_for(&source.name));
    match &extraction {
        Extraction::Found(found) => {
            tracing::debug!(source = %source.name, count = found.len(), "extracted listings");
        }
        Extraction::NoMatch => tracing::debug!(source = %source.name, "no listings matched"),
        Extraction::NoMarkup => tracing::debug!(source = %source.name, "empty page"),
    }
    extraction.into_candidates()
}

/// Keep the first candidate per exact (trimmed) link, in order, up to the cap.
pub(crate) fn dedup_by_link(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let link = c.link.trim();
            !link.is_empty() && seen.insert(link.to_string())
        })
        .take(MAX_CANDIDATES)
        .collect()
}
