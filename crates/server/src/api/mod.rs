//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.
//! Shared response types live here in mod.rs.

mod dashboard;
mod data_model;
pub mod doc;
mod health;
mod sessions;
mod stream;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct QueryErrorResponse {
    pub error: String,
}

/// Bare acknowledgement used by the session mutation endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

pub type ApiError = (StatusCode, Json<QueryErrorResponse>);

pub(crate) fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(QueryErrorResponse {
            error: error.into(),
        }),
    )
}

// ── Re-exports ───────────────────────────────────────────────────
// Keeps flat `api::foo` paths for route registration in router.rs.

pub use dashboard::{dataset_get, dataset_query, dataset_schema, datasets_list};
pub use data_model::create_data_model;
pub use health::health;
pub use sessions::{
    sessions_clear, sessions_create, sessions_delete, sessions_get, sessions_list, sessions_touch,
};
pub use stream::stream;
