//! End-to-end orchestration: collect, enrich, rank, render.

use supscout_core::{Candidate, EnrichedSupplier};

use crate::collect::collect;
use crate::enrich::enrich;
use crate::error::ScoutError;
use crate::fetch::Fetcher;
use crate::rank::rank_top;
use crate::registry::SourceRegistry;
use crate::render::render_cards;

/// Result of a full search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rendered HTML for one to five supplier cards.
    Cards(String),
    /// Nothing survived filtering.
    NoContent,
}

/// The supplier search pipeline bound to one fetcher and source registry.
///
/// Holds no per-query state, so a single instance can serve concurrent
/// queries.
#[derive(Debug)]
pub struct Scout<F> {
    fetcher: F,
    registry: SourceRegistry,
}

impl<F: Fetcher> Scout<F> {
    /// Pipeline over the built-in source registry.
    pub fn new(fetcher: F) -> Self {
        Self::with_registry(fetcher, SourceRegistry::builtin().clone())
    }

    pub fn with_registry(fetcher: F, registry: SourceRegistry) -> Self {
        Self { fetcher, registry }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Merged, link-deduplicated candidates for `query` across all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EmptyQuery`] if `query` is blank.
    pub async fn collect(&self, query: &str) -> Result<Vec<Candidate>, ScoutError> {
        let query = validate(query)?;
        Ok(collect(&self.fetcher, &self.registry, query).await)
    }

    /// The best five distinct suppliers for `query`, highest rating first.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EmptyQuery`] if `query` is blank.
    pub async fn build_top5(&self, query: &str) -> Result<Vec<EnrichedSupplier>, ScoutError> {
        let candidates = self.collect(query).await?;
        let enriched = enrich(&self.fetcher, &candidates).await;
        let ranked = rank_top(enriched);
        tracing::info!(query = query.trim(), suppliers = ranked.len(), "search ranked");
        Ok(ranked)
    }

    /// Run the full pipeline and render the result.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EmptyQuery`] if `query` is blank.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ScoutError> {
        let ranked = self.build_top5(query).await?;
        Ok(render_cards(&ranked).map_or(SearchOutcome::NoContent, SearchOutcome::Cards))
    }
}

fn validate(query: &str) -> Result<&str, ScoutError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(ScoutError::EmptyQuery)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchMiss, FetchOutcome};
    use crate::registry::Source;

    struct Offline;

    impl Fetcher for Offline {
        async fn fetch(&self, _url: &str) -> FetchOutcome {
            FetchOutcome::Miss(FetchMiss::Transport)
        }
    }

    fn scout() -> Scout<Offline> {
        Scout::with_registry(
            Offline,
            SourceRegistry::new(vec![Source::new("Local", "https://local.test/?q={q}")]),
        )
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let err = scout().search("   ").await.unwrap_err();
        assert!(matches!(err, ScoutError::EmptyQuery));
        assert_eq!(err.to_string(), "missing query");
    }

    #[tokio::test]
    async fn unreachable_sources_mean_no_content() {
        let outcome = scout().search("fiber cement").await.expect("search");
        assert_eq!(outcome, SearchOutcome::NoContent);
    }

    #[test]
    fn builtin_pipeline_uses_full_registry() {
        let scout = Scout::new(Offline);
        assert_eq!(scout.registry().len(), SourceRegistry::builtin().len());
    }
}
