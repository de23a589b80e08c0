//! Test utilities for the HTTP adapter
//!
//! Builds the real router around a mocked storage backend and provides
//! request/response helpers.


use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::adapters::inbound::http::{create_router, AppState};
use crate::application::storage_gateway::StorageGateway;
use crate::domain::models::LogRecord;
use crate::ports::{LogStorage, MockLogStorage};

/// Router backed by `storage`, with CORS relaxed
pub(crate) fn create_test_app(storage: MockLogStorage) -> Router {
    create_test_app_with_gateway(StorageGateway::new(Arc::new(storage) as Arc<dyn LogStorage>))
}

pub(crate) fn create_test_app_with_gateway(gateway: StorageGateway) -> Router {
    let mut state = AppState::new(gateway);
    state.cors_disabled = true;
    create_router(state)
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send one request and decode the JSON body
pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("body is not JSON");
    (status, body)
}

pub(crate) fn create_test_logs() -> Vec<LogRecord> {
    vec![
        LogRecord::new("ERROR", "upstream error: timeout"),
        LogRecord::new("WARN", "disk usage warning"),
    ]
}

pub(crate) fn assert_bad_request(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        &serde_json::json!({
            "errors": [{ "error": "Bad Request", "message": "invalid request" }]
        })
    );
}

pub(crate) fn assert_internal_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        &serde_json::json!({
            "errors": [{
                "error": "Internal Server Error",
                "message": "An unexpected error occurred"
            }]
        })
    );
}
