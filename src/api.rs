//! HTTP routes over the verse search index

use crate::corpus::VerseRecord;
use crate::error::QuranSearchError;
use crate::search::{Language, SearchFilters, SearchResults};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;

// === Request/Response types ===

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    lang: Option<String>,
    surah: Option<u32>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    verses: usize,
    index_built: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: QuranSearchError) -> ApiError {
    let status = match err {
        QuranSearchError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        verses: state.corpus().len(),
        index_built: state.search_index.is_built(),
    })
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Result<Response, ApiError> {
    let started = Instant::now();
    let language = params.lang.unwrap_or_else(|| Language::En.code().to_string());
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let filters = SearchFilters { surah: params.surah };

    state.search_index.ensure_built().await.map_err(api_error)?;
    let ranked = match Language::parse(&language) {
        Some(lang) => state.ranked(&params.q, lang, filters).await.map_err(api_error)?,
        None => Arc::new(Vec::new()),
    };

    let results = SearchResults::page(state.corpus(), &params.q, &language, &ranked, limit, offset, started);
    Ok(Json(&results).into_response())
}

async fn get_verse(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<Json<VerseRecord>, ApiError> {
    state
        .corpus()
        .by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(QuranSearchError::NotFound(format!("verse {}", id))))
}

async fn get_surah(State(state): State<Arc<AppState>>, Path(surah): Path<u32>) -> Json<Vec<VerseRecord>> {
    Json(state.corpus().surah(surah).into_iter().cloned().collect())
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/verse/:id", get(get_verse))
        .route("/surah/:surah", get(get_surah))
        .layer(cors)
        .with_state(state)
}
