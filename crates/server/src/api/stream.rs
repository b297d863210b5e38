//! Chat streaming endpoint: canned plan or HITL echo as NDJSON.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};

use modeler_agent::{play, RunOutcome, StreamEvent, StreamInputError, StreamRequest};

use crate::state::AppState;

use super::{api_error, ApiError, QueryErrorResponse};

const NDJSON: &str = "application/x-ndjson";
const MAX_JSON_BODY: usize = 1024 * 1024;

/// Query-string fallback for clients that send neither JSON nor a form.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct StreamQuery {
    pub input: Option<String>,
    pub id: Option<String>,
}

/// How a `/stream` body is decoded. Matching is on a substring of the
/// lowercased `Content-Type`, so parameters and odd prefixes are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Multipart,
    Query,
}

impl BodyKind {
    fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("application/json") {
            BodyKind::Json
        } else if content_type.contains("multipart/form-data") {
            BodyKind::Multipart
        } else {
            BodyKind::Query
        }
    }
}

fn bad_request(err: StreamInputError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, err.to_string())
}

async fn read_multipart(mut multipart: Multipart) -> Result<StreamRequest, StreamInputError> {
    let mut req = StreamRequest::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StreamInputError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "files" || field.file_name().is_some() {
            field
                .bytes()
                .await
                .map_err(|e| StreamInputError::Multipart(e.to_string()))?;
            req.file_count += 1;
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| StreamInputError::Multipart(e.to_string()))?;
        req.set_form_field(&name, value)?;
    }
    Ok(req)
}

async fn decode(query: StreamQuery, request: Request) -> Result<StreamRequest, ApiError> {
    let kind = BodyKind::from_content_type(
        request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
    );

    match kind {
        BodyKind::Json => {
            let body = axum::body::to_bytes(request.into_body(), MAX_JSON_BODY)
                .await
                .map_err(|e| bad_request(StreamInputError::InvalidJson(e.to_string())))?;
            StreamRequest::from_json(&body).map_err(bad_request)
        }
        BodyKind::Multipart => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| bad_request(StreamInputError::Multipart(e.body_text())))?;
            read_multipart(multipart).await.map_err(bad_request)
        }
        BodyKind::Query => Ok(StreamRequest::new(query.input, query.id)),
    }
}

/// Stream a chat turn
///
/// Decodes the request by content type (JSON body, multipart form, or query
/// string) and answers with newline-delimited JSON events. Fresh input gets
/// the staged data-modeling plan ending in a HITL approval prompt; a request
/// carrying `hitlResult` gets the decision echoed back with suggested
/// follow-up queries.
///
/// Event types: step-metadata, step, paragraph, table-schema, table-row,
/// hitl-result, done.
#[utoipa::path(
    post,
    path = "/stream",
    tag = "Stream",
    params(StreamQuery),
    request_body(
        content = Object,
        description = "JSON `{input?, id?, hitlResult?}` or a multipart form with the same fields plus `files`"
    ),
    responses(
        (status = 200, description = "NDJSON event stream", content_type = "application/x-ndjson"),
        (status = 400, description = "Malformed body", body = QueryErrorResponse)
    )
)]
pub async fn stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamQuery>,
    request: Request,
) -> Result<Response, ApiError> {
    let req = decode(query, request).await?;
    info!(
        message_id = req.message_id(),
        input_len = req.input().len(),
        hitl = req.hitl_result.is_some(),
        files = req.file_count,
        "stream requested"
    );

    let script = req.script();
    let config = state.stream.clone();
    let (tx, rx) = mpsc::channel::<StreamEvent>(32);

    tokio::spawn(async move {
        match play(script, &config, &tx).await {
            RunOutcome::Completed { emitted } => debug!(emitted, "stream completed"),
            RunOutcome::Disconnected { emitted } => {
                info!(emitted, "client disconnected before stream finished")
            }
        }
    });

    let lines = ReceiverStream::new(rx).map(|event| Ok::<_, Infallible>(event.to_ndjson_line()));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, NDJSON)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(lines))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
