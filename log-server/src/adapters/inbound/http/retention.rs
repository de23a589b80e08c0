// log-server/src/adapters/inbound/http/retention.rs
//
// REST API endpoints for the log retention (TTL) setting.
// - GET /api/logs/retention: current retention config
// - PUT /api/logs/retention: store a new ttl and apply it

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::Instrument;

use super::dtos::{extract_attributes, UpdateRetentionInput};
use super::envelope::{ApiError, ApiResult, DataEnvelope};
use super::serializer::serialize_one;
use super::AppState;
use crate::application::storage_gateway::StorageGateway;
use crate::domain::models::LOGS_TTL_KEY;

/// GET /api/logs/retention
pub async fn get_retention(State(state): State<AppState>) -> ApiResult<DataEnvelope> {
    let span = tracing::info_span!("get_retention");
    read_retention_config(&state.storage).instrument(span).await
}

pub async fn read_retention_config(gateway: &StorageGateway) -> ApiResult<DataEnvelope> {
    let result = gateway.active().get_config(LOGS_TTL_KEY).await?;

    let Some(config) = result.item else {
        tracing::info!(key = LOGS_TTL_KEY, "Retention config not set");
        return Err(ApiError::BadRequest);
    };

    tracing::debug!(ttl = config.ttl, "Retrieved retention config");
    Ok(DataEnvelope::new(serialize_one(&config)?))
}

/// PUT /api/logs/retention
/// A body that is not valid JSON is handled like one without attributes.
pub async fn update_retention(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<DataEnvelope> {
    let span = tracing::info_span!("update_retention");

    let body = match body {
        Ok(Json(body)) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable retention update body");
            Value::Null
        }
    };

    write_retention_config(&state.storage, &body)
        .instrument(span)
        .await
}

/// Store the new ttl, then have the backend apply it. Both must succeed.
pub async fn write_retention_config(gateway: &StorageGateway, body: &Value) -> ApiResult<DataEnvelope> {
    let attributes = extract_attributes(body);
    let Some(input) = UpdateRetentionInput::from_attributes(&attributes) else {
        tracing::warn!("Retention update without a usable ttl");
        return Err(ApiError::BadRequest);
    };

    let storage = gateway.active();
    let updated = storage.set_config(LOGS_TTL_KEY, input.ttl).await?;
    storage.ensure_retention(input.ttl).await?;

    let Some(config) = updated.item else {
        tracing::error!(ttl = input.ttl, "Storage returned no config after update");
        return Err(ApiError::Internal);
    };

    tracing::info!(ttl = config.ttl, "Updated retention config");
    Ok(DataEnvelope::new(serialize_one(&config)?))
}
