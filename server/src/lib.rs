use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use search_core::{DocId, Document, Page, SearchEngine};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paging knobs exposed to callers of `/search`.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { page_size: Page::DEFAULT_LIMIT, max_page_size: 1000 }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub config: AppConfig,
}

#[derive(Debug)]
pub enum ApiError {
    Search(search_core::Error),
    Internal(String),
}

impl From<search_core::Error> for ApiError {
    fn from(err: search_core::Error) -> Self {
        ApiError::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Search(err) if err.is_client_error() => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            ApiError::Search(err) => {
                tracing::error!(error = %err, "search failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "search task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

pub fn build_app(engine: Arc<SearchEngine>, config: AppConfig) -> Router {
    let app_state = AppState { engine, config };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let start = Instant::now();
    let q = params.q.unwrap_or_default();
    // A zero in the config means one result per page, never a client error.
    let default_limit = i64::try_from(state.config.page_size.max(1)).unwrap_or(i64::MAX);
    let mut page = Page::new(params.limit.unwrap_or(default_limit), params.offset.unwrap_or(0))?;
    page.limit = page.limit.min(state.config.max_page_size.max(1));

    // Ranking is CPU bound; keep it off the async workers.
    let engine = Arc::clone(&state.engine);
    let query = q.clone();
    let docs = tokio::task::spawn_blocking(move || engine.search(&query, page))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::debug!(query = %q, hits = docs.len(), took_ms = start.elapsed().as_millis() as u64, "search served");
    Ok(Json(docs))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<Document>, StatusCode> {
    state.engine.catalog().get(doc_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
