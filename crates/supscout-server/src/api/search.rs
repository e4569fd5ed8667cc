use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use supscout_core::Candidate;
use supscout_scraper::{Fetcher, ScoutError, SearchOutcome};
use tracing::Instrument;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed query, or `None` when absent or blank.
    fn query(self) -> Option<String> {
        self.q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SearchAllResponse {
    status: &'static str,
    query: String,
    count: usize,
    results: Vec<Candidate>,
}

const MISSING_QUERY: &str = "missing query";
const INTERNAL_ERROR: &str = "Internal error";

/// `GET /search?q=`: top five suppliers rendered as HTML cards.
///
/// The pipeline runs on its own task so a panic inside it surfaces as a
/// generic 500 instead of tearing down the connection.
pub(super) async fn search<F: Fetcher + 'static>(
    State(state): State<AppState<F>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query() else {
        return (StatusCode::BAD_REQUEST, MISSING_QUERY).into_response();
    };

    let scout = Arc::clone(&state.scout);
    let joined = tokio::spawn(
        async move { scout.search(&query).await }.instrument(tracing::Span::current()),
    )
    .await;

    match joined {
        Ok(Ok(SearchOutcome::Cards(html))) => Html(html).into_response(),
        Ok(Ok(SearchOutcome::NoContent)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(ScoutError::EmptyQuery)) => (StatusCode::BAD_REQUEST, MISSING_QUERY).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "search pipeline failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "search task aborted");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
    }
}

/// `GET /search_all?q=`: every collected candidate, unenriched, as JSON.
pub(super) async fn search_all<F: Fetcher + 'static>(
    State(state): State<AppState<F>>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchAllResponse>, ApiError> {
    let Some(query) = params.query() else {
        return Err(ApiError::new(req_id.0, "bad_request", MISSING_QUERY));
    };

    let scout = Arc::clone(&state.scout);
    let task_query = query.clone();
    let joined = tokio::spawn(
        async move { scout.collect(&task_query).await }.instrument(tracing::Span::current()),
    )
    .await;

    match joined {
        Ok(Ok(results)) => Ok(Json(SearchAllResponse {
            status: "ok",
            query,
            count: results.len(),
            results,
        })),
        Ok(Err(ScoutError::EmptyQuery)) => {
            Err(ApiError::new(req_id.0, "bad_request", MISSING_QUERY))
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "collection failed");
            Err(ApiError::new(req_id.0, "internal_error", INTERNAL_ERROR))
        }
        Err(err) => {
            tracing::error!(error = %err, "collection task aborted");
            Err(ApiError::new(req_id.0, "internal_error", INTERNAL_ERROR))
        }
    }
}
