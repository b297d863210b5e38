//! Dashboard dataset endpoints: catalog, rows, schema, widget queries.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use modeler_dashboard::query::run_query;
use modeler_dashboard::{
    ColumnSchema, DashboardError, DashboardQuery, Dataset, DatasetSummary, QueryResult, Row,
};

use crate::state::AppState;

use super::{api_error, ApiError, QueryErrorResponse};

#[derive(Serialize)]
pub struct DatasetResponse {
    pub id: String,
    pub title: String,
    pub schema: Vec<ColumnSchema>,
    pub rows: Vec<Row>,
}

fn dashboard_error(err: DashboardError) -> ApiError {
    let status = match err {
        DashboardError::DatasetNotFound(_) => StatusCode::NOT_FOUND,
        DashboardError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
    };
    api_error(status, err.to_string())
}

fn lookup<'a>(state: &'a AppState, id: &str) -> Result<&'a Dataset, ApiError> {
    state.datasets.get(id).map_err(dashboard_error)
}

/// List dashboard datasets
#[utoipa::path(
    get,
    path = "/dashboard/datasets",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dataset ids, titles and row counts", body = Object)
    )
)]
pub async fn datasets_list(State(state): State<Arc<AppState>>) -> Json<Vec<DatasetSummary>> {
    Json(state.datasets.summaries())
}

/// Get a dataset
///
/// Returns all rows together with the inferred schema.
#[utoipa::path(
    get,
    path = "/dashboard/datasets/{id}",
    tag = "Dashboard",
    params(
        ("id" = String, Path, description = "Dataset ID")
    ),
    responses(
        (status = 200, description = "Dataset rows and schema", body = Object),
        (status = 404, description = "Dataset not found", body = QueryErrorResponse)
    )
)]
pub async fn dataset_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DatasetResponse>, ApiError> {
    let dataset = lookup(&state, &id)?;
    Ok(Json(DatasetResponse {
        id: dataset.id.to_string(),
        title: dataset.title.to_string(),
        schema: dataset.schema(),
        rows: dataset.rows.clone(),
    }))
}

/// Get a dataset schema
///
/// Column names in first-seen order with inferred type and nullability.
#[utoipa::path(
    get,
    path = "/dashboard/datasets/{id}/schema",
    tag = "Dashboard",
    params(
        ("id" = String, Path, description = "Dataset ID")
    ),
    responses(
        (status = 200, description = "Inferred columns", body = Object),
        (status = 404, description = "Dataset not found", body = QueryErrorResponse)
    )
)]
pub async fn dataset_schema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ColumnSchema>>, ApiError> {
    Ok(Json(lookup(&state, &id)?.schema()))
}

/// Query a dataset widget
///
/// Applies the filters (AND-ed) and computes the requested widget: `table`,
/// `pie`, `kpi` or `range`.
#[utoipa::path(
    post,
    path = "/dashboard/datasets/{id}/query",
    tag = "Dashboard",
    params(
        ("id" = String, Path, description = "Dataset ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Widget data", body = Object),
        (status = 400, description = "Invalid filter", body = QueryErrorResponse),
        (status = 404, description = "Dataset not found", body = QueryErrorResponse)
    )
)]
pub async fn dataset_query(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(query): Json<DashboardQuery>,
) -> Result<Json<QueryResult>, ApiError> {
    let dataset = lookup(&state, &id)?;
    run_query(dataset, &query).map(Json).map_err(dashboard_error)
}
