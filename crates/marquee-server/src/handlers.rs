use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use marquee_core::{CoreError, Movie, error::ErrorCategory};
use marquee_storage::KeyedStore;

use crate::state::AppState;

/// JSON-bodied error response derived from the core error taxonomy.
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, category = %self.0.category(), "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Marquee Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Readiness reflects the active keyed store: the in-memory backend always
/// answers, the Redis backend answers only while Redis is reachable.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "unready" }),
            )
        }
    }
}

// ---- Object cache (movies) ----

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let fetched = state.movies.get(&id).await?;
    Ok((StatusCode::OK, Json(fetched)))
}

#[derive(Deserialize)]
pub struct UpsertMovieRequest {
    id: Option<Value>,
    title: Option<String>,
    year: Option<Value>,
}

pub async fn upsert_movie(
    State(state): State<AppState>,
    Json(payload): Json<UpsertMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = coerce_movie(payload)?;
    let stored = state.movies.upsert(movie).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "record": stored })),
    ))
}

/// Coerce the loosely-typed upsert body into a `Movie`, mirroring how the
/// wire contract accepts a numeric id or a numeric-string year.
fn coerce_movie(payload: UpsertMovieRequest) -> Result<Movie, CoreError> {
    let missing = || CoreError::invalid_argument("id, title, year required");

    let id = match payload.id {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(missing()),
    };
    let title = match payload.title {
        Some(t) if !t.is_empty() => t,
        _ => return Err(missing()),
    };
    let year = match payload.year {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.parse::<i32>().ok(),
        _ => None,
    }
    .ok_or_else(missing)?;

    Ok(Movie::new(id, title, year))
}

// ---- Profile store (users) ----

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.profiles.update(&id, &updates).await?;
    Ok((StatusCode::OK, Json(view)))
}

pub async fn read_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.profiles.read(&id).await?;
    Ok((StatusCode::OK, Json(view)))
}

// ---- Leaderboard ----

#[derive(Deserialize)]
pub struct ScoreRequest {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    delta: Option<Value>,
}

pub async fn apply_score_delta(
    State(state): State<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = payload
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::invalid_argument("userId and delta required"))?;
    let delta = payload
        .delta
        .as_ref()
        .and_then(numeric)
        .ok_or_else(|| CoreError::invalid_argument("delta must be numeric"))?;

    let view = state.leaderboard.apply_delta(&user_id, delta).await?;
    Ok((StatusCode::OK, Json(view)))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

pub async fn leaderboard_top(
    State(state): State<AppState>,
    Path(n): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // A non-integer or non-positive n silently falls back to the default.
    let rows = state.leaderboard.top(n.parse::<i64>().ok()).await?;
    Ok((StatusCode::OK, Json(json!({ "top": rows }))))
}
