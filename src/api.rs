// src/api.rs
//! HTTP surface over the relevance engine.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /profiles/{id}/relevant-events?threshold=0.5&limit=N`
//! - `POST /score`      `{ profile, events, threshold? }`
//! - `POST /analytics`  `{ events: [ScoredEvent] }`
//! - `GET  /metrics`    only when a Prometheus recorder is attached

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::analytics::ScoringAnalytics;
use crate::error::ScoringError;
use crate::metrics::{self as m, Metrics};
use crate::model::{Event, Profile};
use crate::relevance::{RelevanceEngine, RelevanceHandle};
use crate::scored::ScoredEvent;
use crate::store::Store;

/// Caller-side threshold applied on top of the engine floor when none is given.
pub const DEFAULT_CALLER_THRESHOLD: f64 = 0.5;

#[derive(Clone)]
pub struct AppState {
    pub relevance: RelevanceHandle,
    pub store: Arc<Store>,
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(relevance: RelevanceHandle, store: Store) -> Self {
        Self {
            relevance,
            store: Arc::new(store),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

pub fn router(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/profiles/{id}/relevant-events", get(relevant_events))
        .route("/score", post(score))
        .route("/analytics", post(analytics))
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    match metrics {
        Some(m) => app.merge(m.router()),
        None => app,
    }
}

/* ----------------------------
Errors
---------------------------- */

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::InvalidInput(msg) => ApiError::InvalidInput(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

/* ----------------------------
Payloads
---------------------------- */

#[derive(Debug, Deserialize)]
pub struct RelevantEventsQuery {
    pub threshold: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<ScoredEvent>,
    /// Matches above the caller threshold, before `limit` is applied.
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    #[serde(default)]
    pub events: Vec<ScoredEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: ScoringAnalytics,
}

/* ----------------------------
Handlers
---------------------------- */

async fn relevant_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<RelevantEventsQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    m::record_request("relevant_events");

    let profile = state
        .store
        .profile(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;
    let events = state.store.active_events();

    let engine = state.relevance.snapshot();
    let scored = score_blocking(engine, Some(profile), Some(events)).await?;
    let (events, total) = select(scored, caller_threshold(q.threshold), q.limit);

    info!(profile = %id, total, returned = events.len(), "relevant events");
    Ok(Json(EventsResponse {
        success: true,
        events,
        total,
    }))
}

async fn score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<EventsResponse>, ApiError> {
    m::record_request("score");

    let engine = state.relevance.snapshot();
    let scored = score_blocking(engine, req.profile, req.events).await?;
    let (events, total) = select(scored, caller_threshold(req.threshold), req.limit);

    Ok(Json(EventsResponse {
        success: true,
        events,
        total,
    }))
}

async fn analytics(
    State(state): State<AppState>,
    Json(req): Json<AnalyticsRequest>,
) -> Json<AnalyticsResponse> {
    m::record_request("analytics");

    let analytics = state.relevance.snapshot().analytics(&req.events);
    Json(AnalyticsResponse {
        success: true,
        analytics,
    })
}

/// Run one batch on the blocking pool; large batches fan out over threads.
async fn score_blocking(
    engine: Arc<RelevanceEngine>,
    profile: Option<Profile>,
    events: Option<Vec<Event>>,
) -> Result<Vec<ScoredEvent>, ApiError> {
    let offered = events.as_ref().map_or(0, Vec::len);
    let minimum_score = engine.minimum_score();
    let started = Instant::now();

    let scored = tokio::task::spawn_blocking(move || {
        engine.score_batch(profile.as_ref(), events.as_deref())
    })
    .await
    .map_err(|e| {
        error!(error = ?e, "scoring task failed");
        ApiError::Internal("scoring failed".into())
    })??;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    m::record_batch(offered, scored.len(), elapsed_ms, minimum_score);
    Ok(scored)
}

// Missing or non-finite → default; otherwise clamped to [0, 1].
fn caller_threshold(raw: Option<f64>) -> f64 {
    raw.filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_CALLER_THRESHOLD)
}

/// Apply the caller threshold to an already sorted list, then `limit`.
fn select(
    scored: Vec<ScoredEvent>,
    threshold: f64,
    limit: Option<usize>,
) -> (Vec<ScoredEvent>, usize) {
    let mut kept: Vec<ScoredEvent> = scored
        .into_iter()
        .filter(|s| s.relevance_score() >= threshold)
        .collect();
    let total = kept.len();
    if let Some(n) = limit {
        kept.truncate(n);
    }
    (kept, total)
}
