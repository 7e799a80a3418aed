pub mod dataset;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use ir_core::{Corpus, CoreError, CorpusStore, QueryWeight};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;
const INFO_SAMPLE_DOCS: usize = 5;
const MATRIX_SAMPLE_ROWS: usize = 5;
const MATRIX_SAMPLE_COLS: usize = 10;

pub struct AppConfig {
    pub top_k: usize,
    /// When set, dataset mutations require a matching `X-ADMIN-TOKEN` header.
    pub admin_token: Option<String>,
    /// Comma-separated origin list; `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { top_k: 5, admin_token: None, cors_allow_origin: None, request_timeout: Duration::from_secs(30) }
    }
}

impl AppConfig {
    /// Fill `admin_token` and `cors_allow_origin` from `ADMIN_TOKEN` and `CORS_ALLOW_ORIGIN`.
    pub fn with_env(mut self) -> Self {
        self.admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        self.cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN").ok();
        self
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CorpusStore>,
    pub top_k: usize,
    pub admin_token: Option<String>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    /// Documents with a positive score.
    pub total_hits: usize,
    pub results: Vec<DocumentHit>,
    pub query_weights: Vec<QueryWeight>,
    pub similarities: Vec<Similarity>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentHit {
    pub id: String,
    pub title: String,
    pub content: String,
    pub relevance_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Similarity {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbeddingPoint {
    pub id: String,
    pub title: String,
    pub content: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub documents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub message: String,
    pub num_documents: usize,
    pub num_features: usize,
}

pub fn build_app(store: Arc<CorpusStore>, config: AppConfig) -> Router {
    let app_state = AppState { store, top_k: config.top_k.clamp(1, MAX_K), admin_token: config.admin_token };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_query_handler).post(search_handler))
        .route("/dataset_info", get(dataset_info_handler))
        .route("/tfidf_matrix", get(tfidf_matrix_handler))
        .route("/all_documents", get(all_documents_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/update_dataset", post(update_dataset_handler))
        .route("/reset_dataset", post(reset_dataset_handler))
        .route("/document_embeddings", get(embeddings_2d_handler))
        .route("/document_embeddings_3d", get(embeddings_3d_handler))
        .with_state(app_state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_allow_origin.as_deref()))
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let any = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let Some(val) = allow_origin else { return any };
    let origins: Vec<_> = val
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if origins.is_empty() {
        any
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    }
}

pub async fn search_handler(State(state): State<AppState>, Json(req): Json<SearchRequest>) -> Json<SearchResponse> {
    Json(run_search(&state, req.query, req.k))
}

pub async fn search_query_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    Json(run_search(&state, params.q, params.k))
}

fn run_search(state: &AppState, query: String, k: Option<usize>) -> SearchResponse {
    let start = Instant::now();
    let corpus = state.store.snapshot();
    let k = k.unwrap_or(state.top_k).clamp(1, MAX_K);
    let outcome = corpus.search(&query, k);

    let results = outcome
        .hits
        .iter()
        .map(|hit| DocumentHit {
            id: Corpus::label(hit.doc_id),
            title: Corpus::title(hit.doc_id),
            content: corpus.documents()[hit.doc_id].content.clone(),
            relevance_score: hit.score,
        })
        .collect();
    let total_hits = outcome.similarities.iter().filter(|s| s.score > 0.0).count();
    let similarities = outcome
        .similarities
        .into_iter()
        .map(|s| Similarity { id: Corpus::label(s.doc_id), score: s.score })
        .collect();

    SearchResponse {
        query,
        took_s: start.elapsed().as_secs_f64(),
        total_hits,
        results,
        query_weights: outcome.query_weights,
        similarities,
    }
}

pub async fn dataset_info_handler(State(state): State<AppState>) -> Json<ir_core::DatasetInfo> {
    Json(state.store.snapshot().dataset_info(INFO_SAMPLE_DOCS))
}

pub async fn tfidf_matrix_handler(State(state): State<AppState>) -> Json<ir_core::MatrixSample> {
    Json(state.store.snapshot().matrix_sample(MATRIX_SAMPLE_ROWS, MATRIX_SAMPLE_COLS))
}

pub async fn all_documents_handler(State(state): State<AppState>) -> Json<Vec<DocumentEntry>> {
    let corpus = state.store.snapshot();
    Json(corpus.documents().iter().map(|d| entry(d.id, &d.content)).collect())
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<DocumentEntry>, ApiError> {
    let corpus = state.store.snapshot();
    match corpus.find(&doc_id) {
        Some(doc) => Ok(Json(entry(doc.id, &doc.content))),
        None => Err(api_error(StatusCode::NOT_FOUND, format!("no document {doc_id}"))),
    }
}

fn entry(doc_id: usize, content: &str) -> DocumentEntry {
    DocumentEntry { id: Corpus::label(doc_id), title: Corpus::title(doc_id), content: content.to_string() }
}

pub async fn update_dataset_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<DatasetResponse>, ApiError> {
    authorize(&state, &headers)?;
    let store = state.store.clone();
    let corpus = tokio::task::spawn_blocking(move || store.replace(req.documents))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(core_error)?;
    Ok(Json(dataset_response("Dataset updated successfully", &corpus)))
}

pub async fn reset_dataset_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<DatasetResponse>, ApiError> {
    authorize(&state, &headers)?;
    let store = state.store.clone();
    let corpus = tokio::task::spawn_blocking(move || store.reset())
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(core_error)?;
    Ok(Json(dataset_response("Dataset reset to default", &corpus)))
}

fn dataset_response(message: &str, corpus: &Corpus) -> DatasetResponse {
    DatasetResponse { message: message.to_string(), num_documents: corpus.len(), num_features: corpus.vocabulary().len() }
}

fn core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidDataset(_) => api_error(StatusCode::BAD_REQUEST, err.to_string()),
        CoreError::NumericDegenerate(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub async fn embeddings_2d_handler(State(state): State<AppState>) -> Result<Json<Vec<EmbeddingPoint>>, ApiError> {
    embeddings(&state, 2).await.map(Json)
}

pub async fn embeddings_3d_handler(State(state): State<AppState>) -> Result<Json<Vec<EmbeddingPoint>>, ApiError> {
    embeddings(&state, 3).await.map(Json)
}

async fn embeddings(state: &AppState, dims: usize) -> Result<Vec<EmbeddingPoint>, ApiError> {
    let corpus = state.store.snapshot();
    let snapshot = corpus.clone();
    let projections = tokio::task::spawn_blocking(move || snapshot.project(dims))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(projections
        .into_iter()
        .map(|p| {
            let doc = &corpus.documents()[p.doc_id];
            EmbeddingPoint {
                id: Corpus::label(p.doc_id),
                title: Corpus::title(p.doc_id),
                content: doc.content.clone(),
                x: p.coords[0],
                y: p.coords[1],
                z: p.coords.get(2).copied().filter(|_| dims > 2),
            }
        })
        .collect())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(required) = &state.admin_token else { return Ok(()) };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "invalid admin token"))
    }
}
