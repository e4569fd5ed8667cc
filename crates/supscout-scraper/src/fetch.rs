//! Soft-failing page fetcher.
//!
//! A fetch never errors: any transport failure, timeout or unsuccessful
//! status is reported as a [`FetchOutcome::Miss`] and downstream stages
//! treat it exactly like an empty page. No retries; the registry's
//! redundancy is what absorbs an unreachable source.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use supscout_core::FetchSettings;

use crate::error::ScoutError;

/// Why a fetch produced no markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMiss {
    Timeout,
    /// Connection, TLS, DNS or redirect failure.
    Transport,
    /// Response status outside `200..400`.
    Status(u16),
    /// The body could not be read or decoded.
    Body,
}

impl std::fmt::Display for FetchMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMiss::Timeout => write!(f, "timeout"),
            FetchMiss::Transport => write!(f, "transport error"),
            FetchMiss::Status(status) => write!(f, "HTTP {status}"),
            FetchMiss::Body => write!(f, "unreadable body"),
        }
    }
}

/// Result of one fetch. `Page("")` (a reachable but empty page) is kept
/// distinct from a miss even though the pipeline handles both the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(String),
    Miss(FetchMiss),
}

impl FetchOutcome {
    /// The fetched markup, or `""` for a miss.
    #[must_use]
    pub fn markup(&self) -> &str {
        match self {
            FetchOutcome::Page(body) => body,
            FetchOutcome::Miss(_) => "",
        }
    }

    #[must_use]
    pub fn into_markup(self) -> String {
        match self {
            FetchOutcome::Page(body) => body,
            FetchOutcome::Miss(_) => String::new(),
        }
    }

    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, FetchOutcome::Miss(_))
    }
}

/// Anything that can turn a URL into page markup.
///
/// Implementations must be shareable across the collector's concurrent
/// fan-out, hence `Send + Sync` and a `Send` future.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// [`Fetcher`] backed by a shared `reqwest::Client` with a fixed browser
/// identity and a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from the configured timeout and request identity.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidHeader`] if the configured accept-language
    /// is not a valid header value, or [`ScoutError::Http`] if the client
    /// cannot be constructed.
    pub fn new(settings: &FetchSettings) -> Result<Self, ScoutError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&settings.accept_language).map_err(|e| {
                ScoutError::InvalidHeader {
                    name: "accept-language",
                    reason: e.to_string(),
                }
            })?,
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                let miss = if err.is_timeout() {
                    FetchMiss::Timeout
                } else {
                    FetchMiss::Transport
                };
                tracing::debug!(url, error = %err, %miss, "fetch failed");
                return FetchOutcome::Miss(miss);
            }
        };

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            tracing::debug!(url, status = status.as_u16(), "fetch returned unusable status");
            return FetchOutcome::Miss(FetchMiss::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Page(body),
            Err(err) => {
                let miss = if err.is_timeout() {
                    FetchMiss::Timeout
                } else {
                    FetchMiss::Body
                };
                tracing::debug!(url, error = %err, %miss, "reading response body failed");
                FetchOutcome::Miss(miss)
            }
        }
    }
}
