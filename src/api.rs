//! HTTP API.
//!
//! JSON endpoints over the session store:
//!
//! - `POST /api/match/create` — validate pre-match data, create a session
//! - `GET /api/match/{id}` — fetch a session
//! - `PATCH /api/match/{id}` — partial session update
//! - `POST /api/match/{id}/timer-event` — append a clock lifecycle event
//! - `POST /api/match/{id}/score-event` — append a score event
//! - `GET /api/settings` — the match settings the server was started with
//! - `GET /api/health` — liveness probe
//!
//! Identifiers are server-assigned: event bodies carry payload fields
//! only and come back stamped with a fresh id and timestamp.

use std::sync::Arc;

use axum::{Json, Router};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{TimerEvent, TimerEventType};
use crate::config::MatchSettings;
use crate::error::{StoreError, ValidationIssue};
use crate::prematch::PreMatchData;
use crate::score::{ScoreEvent, Team};
use crate::session::{MatchSession, SessionPatch, SessionStore};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    /// Session persistence.
    pub store: Arc<dyn SessionStore>,
    /// Clock parameters the server was started with.
    pub settings: MatchSettings,
}

/// Builds the API router over a session store and the resolved settings.
pub fn router(store: Arc<dyn SessionStore>, settings: MatchSettings) -> Router {
    Router::new()
        .route("/api/match/create", post(create_match))
        .route("/api/match/{id}", get(get_match).patch(update_match))
        .route("/api/match/{id}/timer-event", post(add_timer_event))
        .route("/api/match/{id}/score-event", post(add_score_event))
        .route("/api/settings", get(get_settings))
        .route("/api/health", get(health))
        .with_state(ApiState { store, settings })
}

// ============================================================================
// Request/response bodies
// ============================================================================

/// Body of `POST /api/match/create`.
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    /// Validated before the session is created.
    pub pre_match: PreMatchData,
}

/// Body of `POST /api/match/{id}/timer-event`.
#[derive(Debug, Deserialize)]
pub struct TimerEventRequest {
    /// Lifecycle marker kind.
    pub event_type: TimerEventType,
    /// Match time at emission, in seconds.
    pub match_time_seconds: u32,
    /// Pause duration for resume events.
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Free-form annotation.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /api/match/{id}/score-event`.
#[derive(Debug, Deserialize)]
pub struct ScoreEventRequest {
    /// Team whose score changed.
    pub team: Team,
    /// Regulation match time at the change, in seconds.
    pub match_time_seconds: u32,
    /// Home score after the change.
    pub home_score: u32,
    /// Away score after the change.
    pub away_score: u32,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Handler-level failure, mapped onto an HTTP status and JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown session id.
    NotFound,
    /// Pre-match validation failed.
    Validation(Vec<ValidationIssue>),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Match not found" })),
            )
                .into_response(),
            Self::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid match data", "issues": issues })),
            )
                .into_response(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_match(
    State(state): State<ApiState>,
    Json(body): Json<CreateMatchRequest>,
) -> Result<Json<MatchSession>, ApiError> {
    if let Err(crate::error::ConfigError::ValidationError { issues }) = body.pre_match.validate() {
        return Err(ApiError::Validation(issues));
    }

    let session = state
        .store
        .create(MatchSession::new(body.pre_match, Utc::now()))
        .await?;
    info!(session_id = %session.id, home = %session.pre_match.home_team,
        away = %session.pre_match.away_team, "match session created");
    Ok(Json(session))
}

async fn get_match(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSession>, ApiError> {
    let session = state.store.get(id).await?;
    Ok(Json(session))
}

async fn update_match(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SessionPatch>,
) -> Result<Json<MatchSession>, ApiError> {
    let session = state.store.update(id, patch).await?;
    debug!(session_id = %id, "match session updated");
    Ok(Json(session))
}

async fn add_timer_event(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TimerEventRequest>,
) -> Result<Json<TimerEvent>, ApiError> {
    let mut event = TimerEvent::new(body.event_type, body.match_time_seconds, Utc::now());
    event.duration_seconds = body.duration_seconds;
    event.notes = body.notes;

    state.store.append_timer_event(id, event.clone()).await?;
    debug!(session_id = %id, event = %event.event_type, "timer event appended");
    Ok(Json(event))
}

async fn add_score_event(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ScoreEventRequest>,
) -> Result<Json<ScoreEvent>, ApiError> {
    let event = ScoreEvent {
        id: Uuid::new_v4(),
        team: body.team,
        match_time_seconds: body.match_time_seconds,
        timestamp: Utc::now(),
        home_score: body.home_score,
        away_score: body.away_score,
    };

    state.store.append_score_event(id, event.clone()).await?;
    debug!(session_id = %id, team = %event.team, "score event appended");
    Ok(Json(event))
}

async fn get_settings(State(state): State<ApiState>) -> Json<MatchSettings> {
    Json(state.settings)
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
