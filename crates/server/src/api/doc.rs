//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI 3.1 spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "modeler API",
        version = "0.1.0",
        description = "Mock backend for a conversational data-modeling assistant: sessions, NDJSON chat streaming with HITL approval, and dashboard datasets.",
    ),
    tags(
        (name = "Health", description = "Server liveness"),
        (name = "Sessions", description = "In-memory chat sessions"),
        (name = "Stream", description = "Staged data-modeling plan and HITL echo over NDJSON"),
        (name = "Data Model", description = "Data-model job placeholder"),
        (name = "Dashboard", description = "Hardcoded datasets with schema inference, filters and widgets"),
    ),
    paths(
        // Health
        crate::api::health::health,
        // Sessions
        crate::api::sessions::sessions_list,
        crate::api::sessions::sessions_create,
        crate::api::sessions::sessions_get,
        crate::api::sessions::sessions_touch,
        crate::api::sessions::sessions_delete,
        crate::api::sessions::sessions_clear,
        // Stream
        crate::api::stream::stream,
        // Data model
        crate::api::data_model::create_data_model,
        // Dashboard
        crate::api::dashboard::datasets_list,
        crate::api::dashboard::dataset_get,
        crate::api::dashboard::dataset_schema,
        crate::api::dashboard::dataset_query,
    ),
    components(schemas(
        // Shared
        crate::api::QueryErrorResponse,
        crate::api::OkResponse,
        // Health
        crate::api::health::HealthResponse,
        // Sessions
        crate::api::sessions::SessionCreateRequest,
        // Data model
        crate::api::data_model::DataModelJob,
    ))
)]
pub struct ApiDoc;
