//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use modeler_core::config::ServerConfig;

use crate::api;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// `*` allows every origin; anything else is the one origin browsers may call from.
/// The layer also answers every OPTIONS preflight before routing.
fn cors_layer(server: &ServerConfig) -> anyhow::Result<CorsLayer> {
    if server.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }
    let origin = HeaderValue::from_str(&server.cors_origin)
        .with_context(|| format!("invalid CORS_ORIGIN: {}", server.cors_origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, server: &ServerConfig) -> anyhow::Result<Router> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            "/sessions",
            get(api::sessions_list)
                .post(api::sessions_create)
                .delete(api::sessions_clear),
        )
        .route(
            "/sessions/{id}",
            get(api::sessions_get)
                .put(api::sessions_touch)
                .delete(api::sessions_delete),
        )
        .route("/stream", post(api::stream))
        .route("/createDataModel", post(api::create_data_model))
        // Dashboard datasets
        .route("/dashboard/datasets", get(api::datasets_list))
        .route("/dashboard/datasets/{id}", get(api::dataset_get))
        .route("/dashboard/datasets/{id}/schema", get(api::dataset_schema))
        .route("/dashboard/datasets/{id}/query", post(api::dataset_query));

    Ok(app
        .layer(cors_layer(server)?)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi())))
}
