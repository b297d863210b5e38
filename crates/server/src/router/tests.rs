use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use modeler_core::config::{ServerConfig, StreamConfig};

use super::build_router;
use crate::state::AppState;

fn server_config(cors_origin: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origin: cors_origin.into(),
    }
}

fn app() -> Router {
    let state = Arc::new(AppState::new(StreamConfig::immediate()));
    build_router(state, &server_config("*")).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let (status, bytes) = send(app, request).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ndjson(bytes: &Bytes) -> Vec<Value> {
    std::str::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn types(events: &[Value]) -> Vec<&str> {
    events.iter().map(|e| e["type"].as_str().unwrap()).collect()
}

// ── Health ───────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_session_count() {
    let app = app();
    send_json(&app, Method::POST, "/sessions", Some(json!({}))).await;

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions"], 1);
}

// ── Sessions ─────────────────────────────────────────────────────

#[tokio::test]
async fn session_lifecycle() {
    let app = app();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/sessions",
        Some(json!({ "agent": "modeler", "title": "Products" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Products");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, untitled) = send_json(&app, Method::POST, "/sessions", Some(json!({}))).await;
    assert!(untitled["title"].as_str().unwrap().starts_with("Session "));
    assert!(untitled["agent"].is_null());

    let (_, list) = send_json(&app, Method::GET, "/sessions", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["id"], id.as_str());

    let (status, touched) = send_json(&app, Method::PUT, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(touched, json!({ "ok": true }));

    let (status, fetched) = send_json(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fetched["lastUpdated"].as_f64().unwrap() >= fetched["createdAt"].as_f64().unwrap());

    let (status, deleted) = send_json(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "ok": true }));

    let (status, missing) = send_json(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(missing["error"].as_str().unwrap().contains(&id));

    let (status, cleared) = send_json(&app, Method::DELETE, "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared, json!({ "ok": true }));
    let (_, list) = send_json(&app, Method::GET, "/sessions", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn touching_unknown_session_is_not_found() {
    let app = app();
    let (status, body) = send_json(&app, Method::PUT, "/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "ok": false }));

    let (status, body) = send_json(&app, Method::DELETE, "/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "ok": false }));
}

#[tokio::test]
async fn preflight_is_answered_by_cors_layer() {
    let app = app();
    for uri in ["/sessions", "/sessions/abc"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}

// ── Stream ───────────────────────────────────────────────────────

#[tokio::test]
async fn json_stream_plays_plan_as_ndjson() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/stream")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "input": "model my products", "id": "m-1" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/x-ndjson"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.ends_with(b"\n"));

    let events = ndjson(&bytes);
    assert_eq!(
        types(&events),
        vec![
            "step-metadata",
            "step",
            "paragraph",
            "paragraph",
            "paragraph",
            "step",
            "table-schema",
            "table-row",
            "table-row",
            "step",
            "done",
        ]
    );
    assert_eq!(events[0]["total"], 3);
    assert_eq!(events[6]["content"]["tableName"], "products");
    assert_eq!(events[7]["content"]["id"], "p1");
    assert_eq!(events[8]["content"]["price"], 19.99);

    let done = &events[10];
    assert_eq!(done["meta"]["messageId"], "m-1");
    assert_eq!(done["meta"]["hitl"]["options"][1]["id"], "modify");
}

#[tokio::test]
async fn query_string_is_used_without_body_content_type() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/stream?input=hello&id=q-1")
        .body(Body::empty())
        .unwrap();

    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let events = ndjson(&bytes);
    assert_eq!(events.len(), 11);
    assert_eq!(events[10]["meta"]["messageId"], "q-1");
}

#[tokio::test]
async fn hitl_result_is_echoed_with_suggestions() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/stream")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "id": "m-2", "hitlResult": { "action": "modify", "optionId": "modify" } })
                .to_string(),
        ))
        .unwrap();

    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let events = ndjson(&bytes);
    assert_eq!(
        types(&events),
        vec!["step-metadata", "step", "hitl-result", "paragraph", "done"]
    );
    assert_eq!(events[2]["content"]["action"], "modify");
    assert_eq!(events[2]["content"]["optionId"], "modify");
    let suggestions = events[4]["meta"]["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(events[4]["meta"].get("hitl").is_none());
}

#[tokio::test]
async fn hitl_result_without_action_gets_generic_echo() {
    let app = app();
    for hitl in [json!({ "optionId": "modify" }), json!({})] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/stream")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "id": "m-9", "hitlResult": hitl }).to_string()))
            .unwrap();

        let (status, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let events = ndjson(&bytes);
        assert_eq!(
            types(&events),
            vec!["step-metadata", "step", "hitl-result", "paragraph", "done"]
        );
        assert_eq!(events[2]["content"]["action"], "");
        assert_eq!(
            events[4]["meta"]["suggestions"],
            json!(modeler_agent::hitl::suggestions_for(""))
        );
        assert_eq!(events[4]["meta"]["messageId"], "m-9");
    }
}

#[tokio::test]
async fn non_string_input_still_streams_plan() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/stream")
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(json!({ "input": 42, "id": "m-10" }).to_string()))
        .unwrap();

    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let events = ndjson(&bytes);
    assert_eq!(events.len(), 11);
    assert_eq!(events[10]["meta"]["messageId"], "m-10");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/stream")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{broken"))
        .unwrap();

    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, filename, value) in parts {
        body.push_str("--XBOUNDARY\r\n");
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                name, filename
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str("--XBOUNDARY--\r\n");
    body
}

fn multipart_request(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/stream")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn multipart_form_with_files_streams_plan() {
    let app = app();
    let body = multipart_body(&[
        ("input", None, "model these"),
        ("id", None, "m-3"),
        ("files", Some("products.csv"), "id,name\np1,Product A"),
    ]);

    let (status, bytes) = send(&app, multipart_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    let events = ndjson(&bytes);
    assert_eq!(events.len(), 11);
    assert_eq!(events[10]["meta"]["messageId"], "m-3");
}

#[tokio::test]
async fn multipart_hitl_result_is_parsed_from_text_field() {
    let app = app();
    let body = multipart_body(&[
        ("id", None, "m-4"),
        ("hitlResult", None, r#"{"action":"approve_plan"}"#),
    ]);

    let (status, bytes) = send(&app, multipart_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    let events = ndjson(&bytes);
    assert_eq!(events[2]["type"], "hitl-result");
    assert_eq!(events[2]["content"]["action"], "approve_plan");
}

#[tokio::test]
async fn multipart_with_bad_hitl_result_is_bad_request() {
    let app = app();
    let body = multipart_body(&[("hitlResult", None, "{nope")]);

    let (status, _) = send(&app, multipart_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Data model ───────────────────────────────────────────────────

#[tokio::test]
async fn create_data_model_echoes_payload() {
    let app = app();
    let payload = json!({ "tables": ["products"], "dialect": "postgres" });
    let (status, body) = send_json(&app, Method::POST, "/createDataModel", Some(payload.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], payload);
    assert_eq!(body["jobId"].as_str().unwrap().len(), 36);
}

// ── Dashboard ────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_lists_and_serves_datasets() {
    let app = app();
    let (status, list) = send_json(&app, Method::GET, "/dashboard/datasets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        list,
        json!([
            { "id": "sales", "title": list[0]["title"], "rowCount": 8 },
            { "id": "signups", "title": list[1]["title"], "rowCount": 6 }
        ])
    );

    let (status, sales) = send_json(&app, Method::GET, "/dashboard/datasets/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales["rows"].as_array().unwrap().len(), 8);
    assert_eq!(sales["schema"][0], json!({ "name": "month", "type": "date", "nullable": false }));

    let (status, schema) = send_json(&app, Method::GET, "/dashboard/datasets/sales/schema", None).await;
    assert_eq!(status, StatusCode::OK);
    let channel = schema
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "channel")
        .unwrap();
    assert_eq!(channel["nullable"], true);
}

#[tokio::test]
async fn unknown_dataset_is_not_found() {
    let app = app();
    for uri in ["/dashboard/datasets/nope", "/dashboard/datasets/nope/schema"] {
        let (status, body) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nope"));
    }

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/dashboard/datasets/nope/query",
        Some(json!({ "widget": { "type": "table" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_query_computes_widgets() {
    let app = app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/dashboard/datasets/signups/query",
        Some(json!({
            "filters": [{ "op": "eq", "field": "source", "value": "ads" }],
            "widget": { "type": "range", "field": "visits" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "dataset": "signups",
            "matched": 2,
            "widget": { "type": "range", "field": "visits", "min": 800.0, "max": 900.0 }
        })
    );
}

#[tokio::test]
async fn inverted_range_filter_is_bad_request() {
    let app = app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/dashboard/datasets/sales/query",
        Some(json!({
            "filters": [{ "op": "range", "field": "revenue", "min": 10, "max": 1 }],
            "widget": { "type": "table" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("revenue"));
}

// ── CORS ─────────────────────────────────────────────────────────

#[tokio::test]
async fn configured_origin_is_echoed() {
    let state = Arc::new(AppState::new(StreamConfig::immediate()));
    let app = build_router(state, &server_config("http://localhost:3000")).unwrap();
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}

#[test]
fn invalid_origin_fails_router_build() {
    let state = Arc::new(AppState::new(StreamConfig::immediate()));
    assert!(build_router(state, &server_config("bad\norigin")).is_err());
}
