//! Placeholder for the data-model generation pipeline.

use axum::Json;
use serde::Serialize;
use tracing::info;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataModelJob {
    pub job_id: String,
    /// The request body, echoed unchanged.
    #[schema(value_type = Object)]
    pub received: serde_json::Value,
}

/// Start a data-model job
///
/// Returns a fresh job id and echoes the payload. Nothing is scheduled.
#[utoipa::path(
    post,
    path = "/createDataModel",
    tag = "Data Model",
    request_body = Object,
    responses(
        (status = 200, description = "Job accepted", body = DataModelJob)
    )
)]
pub async fn create_data_model(Json(payload): Json<serde_json::Value>) -> Json<DataModelJob> {
    let job_id = uuid::Uuid::new_v4().to_string();
    info!(job_id = %job_id, "data model job accepted");
    Json(DataModelJob {
        job_id,
        received: payload,
    })
}
