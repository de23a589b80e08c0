//! Logvault REST API module
//!
//! Provides the logs, log metadata and retention endpoints. Every response
//! uses the `data`/`errors` envelope. Includes CORS configuration, request
//! tracing, and conversion of handler panics into the 500 envelope.

pub mod dtos;
pub mod envelope;
pub mod logs;
pub mod retention;
pub mod serializer;

#[cfg(test)]
mod tests;

pub use envelope::{ApiError, ApiResult, DataEnvelope, ErrorEnvelope, ErrorObject};

use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::application::storage_gateway::StorageGateway;
use logs::{get_log_meta, get_logs};
use retention::{get_retention, update_retention};

#[derive(Clone)]
pub struct AppState {
    pub storage: StorageGateway,
    pub allowed_origins: Vec<String>,
    pub cors_disabled: bool,
}

impl AppState {
    pub fn new(storage: StorageGateway) -> Self {
        Self {
            storage,
            allowed_origins: vec![],
            cors_disabled: false,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Create CORS layer - either permissive (all origins) or restricted based on config
    let cors = if state.cors_disabled {
        tracing::warn!(
            "CORS is DISABLED - allowing all origins. This should only be used in development!"
        );
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(
                state
                    .allowed_origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    };

    // Create HTTP tracing layer for request/response logging
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "HTTP request started"
            );
        })
        .on_response(
            DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/api/logs", get(get_logs))
        .route("/api/logs/retention", get(get_retention).put(update_retention))
        .route("/api/logs/:logId/meta", get(get_log_meta))
        // Panics become the 500 envelope; must sit inside the trace layer
        .layer(CatchPanicLayer::custom(envelope::panic_response))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
