mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use supscout_scraper::{Fetcher, Scout};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

/// Shared handler state: one pipeline instance serving every request.
pub struct AppState<F> {
    pub scout: Arc<Scout<F>>,
}

impl<F> AppState<F> {
    pub fn new(scout: Arc<Scout<F>>) -> Self {
        Self { scout }
    }
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            scout: Arc::clone(&self.scout),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

const USAGE: &str = "Supplier scout is running. \
GET /search?q=<product> returns the top 5 suppliers as HTML cards; \
GET /search_all?q=<product> returns every collected listing as JSON.";

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app<F: Fetcher + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search::search::<F>))
        .route("/search_all", get(search::search_all::<F>))
        .route("/api/v1/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn index() -> &'static str {
    USAGE
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use supscout_scraper::{FetchMiss, FetchOutcome, Source, SourceRegistry};
    use tower::ServiceExt;

    use super::*;

    /// Serves fixed markup keyed by URL without its query string.
    #[derive(Default)]
    struct FixtureFetcher {
        pages: HashMap<&'static str, &'static str>,
    }

    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            let key = url.split('?').next().unwrap_or(url);
            match self.pages.get(key) {
                Some(body) => FetchOutcome::Page((*body).to_string()),
                None => FetchOutcome::Miss(FetchMiss::Status(404)),
            }
        }
    }

    struct BrokenFetcher;

    impl Fetcher for BrokenFetcher {
        async fn fetch(&self, _url: &str) -> FetchOutcome {
            panic!("fixture fetcher failure");
        }
    }

    const LISTINGS: &str = "<html><body>\
        <h2><a href=\"https://maker-a.test/p\">Alpha Panel Factory</a></h2>\
        <h2><a href=\"//maker-b.test/p\">Beta Board Works</a></h2>\
        </body></html>";

    const FACTORY: &str = "<html><body><p>Our factory has 2 production lines. \
        ISO certified. Export license.</p><p>MOQ: 200</p></body></html>";

    fn registry() -> SourceRegistry {
        SourceRegistry::new(vec![Source::new(
            "Fixture",
            "https://listings.test/search?q={q}",
        )])
    }

    fn app_with<F: Fetcher + 'static>(fetcher: F) -> Router {
        build_app(AppState::new(Arc::new(Scout::with_registry(
            fetcher,
            registry(),
        ))))
    }

    fn fixture_app() -> Router {
        let mut fetcher = FixtureFetcher::default();
        fetcher.pages.insert("https://listings.test/search", LISTINGS);
        fetcher.pages.insert("https://maker-a.test/p", FACTORY);
        fetcher.pages.insert("https://maker-b.test/p", FACTORY);
        app_with(fetcher)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, headers, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn root_returns_usage_text() {
        let (status, _, body) = get(fixture_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/search?q="));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, _, body) = get(fixture_app(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let (status, _, body) = get(fixture_app(), "/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "missing query");

        let (status, _, _) = get(fixture_app(), "/search?q=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_renders_cards_as_html() {
        let (status, headers, body) = get(fixture_app(), "/search?q=fiber%20cement").await;
        assert_eq!(status, StatusCode::OK);
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
        assert_eq!(body.matches("<b>TOP ").count(), 2);
        assert!(body.contains("Alpha Panel Factory"));
        assert!(body.contains("https://maker-b.test/p"));
    }

    #[tokio::test]
    async fn search_with_nothing_found_is_no_content() {
        let (status, _, body) = get(app_with(FixtureFetcher::default()), "/search?q=panels").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn pipeline_panic_is_generic_server_error() {
        let (status, _, body) = get(app_with(BrokenFetcher), "/search?q=panels").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal error");
    }

    #[tokio::test]
    async fn search_all_lists_candidates_as_json() {
        let (status, _, body) = get(fixture_app(), "/search_all?q=panels").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["query"], "panels");
        assert_eq!(json["count"], 2);
        assert_eq!(json["results"][0]["title"], "Alpha Panel Factory");
        assert_eq!(json["results"][1]["link"], "https://maker-b.test/p");
        assert_eq!(json["results"][1]["source"], "Fixture");
    }

    #[tokio::test]
    async fn search_all_without_query_is_json_error() {
        let (status, _, body) = get(fixture_app(), "/search_all?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json["error"]["code"], "bad_request");
        assert_eq!(json["error"]["message"], "missing query");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let response = fixture_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let (_, headers, _) = get(fixture_app(), "/").await;
        let id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(id.len(), 36);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = fixture_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://dashboard.example.com")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[test]
    fn api_error_bad_request_maps_to_400() {
        let response = ApiError::new("req-1", "bad_request", "missing query").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
