//! Supplier discovery pipeline: query a registry of B2B directories and
//! search engines, pull listings out of their result pages, visit each
//! listing to scrape contacts and rate its trustworthiness, and render the
//! best five as HTML cards.

pub mod collect;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod query;
pub mod rank;
pub mod registry;
pub mod render;
pub mod score;

pub use collect::{collect, CHUNK_SIZE, MAX_CANDIDATES};
pub use enrich::{enrich, extract_contacts, MAX_ENRICHED};
pub use error::ScoutError;
pub use extract::{extract_listings, Extraction};
pub use fetch::{FetchMiss, FetchOutcome, Fetcher, HttpFetcher};
pub use pipeline::{Scout, SearchOutcome};
pub use query::{encode_query, normalize_query};
pub use rank::{identity_key, rank_top, TOP_N};
pub use registry::{FieldHint, Source, SourceRegistry};
pub use render::{render_cards, SEPARATOR};
pub use score::TrustSignals;
