//! Session endpoints: list, create, get, touch, delete, clear.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use modeler_agent::Session;

use crate::state::AppState;

use super::{api_error, ApiError, OkResponse, QueryErrorResponse};

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SessionCreateRequest {
    pub agent: Option<String>,
    pub title: Option<String>,
}

fn ok(ok: bool) -> (StatusCode, Json<OkResponse>) {
    let status = if ok { StatusCode::OK } else { StatusCode::NOT_FOUND };
    (status, Json(OkResponse { ok }))
}

/// List all sessions
///
/// Returns every session in creation order.
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "Sessions",
    responses(
        (status = 200, description = "All sessions", body = Object)
    )
)]
pub async fn sessions_list(State(state): State<Arc<AppState>>) -> Json<Vec<Session>> {
    Json(state.sessions.read().await.list())
}

/// Create a new session
///
/// An absent or empty title becomes `Session <first 8 chars of id>`.
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Sessions",
    request_body = SessionCreateRequest,
    responses(
        (status = 200, description = "Session created", body = Object)
    )
)]
pub async fn sessions_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionCreateRequest>,
) -> Json<Session> {
    let mut store = state.sessions.write().await;
    Json(store.create(req.agent.as_deref(), req.title.as_deref()))
}

/// Get a session by ID
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "Sessions",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "The session", body = Object),
        (status = 404, description = "Session not found", body = QueryErrorResponse)
    )
)]
pub async fn sessions_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Session not found: {}", id)))
}

/// Touch a session
///
/// Bumps `lastUpdated` to now.
#[utoipa::path(
    put,
    path = "/sessions/{id}",
    tag = "Sessions",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session touched", body = OkResponse),
        (status = 404, description = "Session not found", body = OkResponse)
    )
)]
pub async fn sessions_touch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<OkResponse>) {
    ok(state.sessions.write().await.touch(&id).is_some())
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "Sessions",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session deleted", body = OkResponse),
        (status = 404, description = "Session not found", body = OkResponse)
    )
)]
pub async fn sessions_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<OkResponse>) {
    ok(state.sessions.write().await.remove(&id))
}

/// Delete every session
#[utoipa::path(
    delete,
    path = "/sessions",
    tag = "Sessions",
    responses(
        (status = 200, description = "All sessions removed", body = OkResponse)
    )
)]
pub async fn sessions_clear(State(state): State<Arc<AppState>>) -> Json<OkResponse> {
    state.sessions.write().await.clear();
    Json(OkResponse { ok: true })
}
