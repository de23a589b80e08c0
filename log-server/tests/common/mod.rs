// Shared helpers for the integration tests: drive the public router in-process

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use logvault_server::adapters::inbound::http::{create_router, AppState};
use logvault_server::application::storage_gateway::StorageGateway;
use logvault_server::ports::LogStorage;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn router_for(storage: Arc<dyn LogStorage>) -> Router {
    let mut state = AppState::new(StorageGateway::new(storage));
    state.allowed_origins = vec!["http://localhost:8080".to_string()];
    create_router(state)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Messages of the `log` resources in a `data` array, in response order
pub fn messages(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|resource| {
            assert_eq!(resource["type"], "log");
            resource["attributes"]["message"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect()
}
