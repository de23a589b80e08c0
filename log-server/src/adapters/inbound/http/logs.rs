//! Logs endpoint handlers
//!
//! - GET /api/logs: list or search log records
//! - GET /api/logs/:logId/meta: per-log metadata

use axum::extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State};
use std::collections::HashMap;
use tracing::Instrument;

use super::envelope::{ApiError, ApiResult, DataEnvelope};
use super::serializer::{serialize_many, serialize_one};
use super::AppState;
use crate::application::storage_gateway::StorageGateway;
use crate::domain::models::LogMeta;
use crate::domain::services::query_normalizer::{LogQuery, LogQueryParams};

/// Path parameter naming the log of `GET /api/logs/:logId/meta`
pub const LOG_ID_PARAM: &str = "logId";

/// GET /api/logs
pub async fn get_logs(
    State(state): State<AppState>,
    params: Result<Query<LogQueryParams>, QueryRejection>,
) -> ApiResult<DataEnvelope> {
    let span = tracing::info_span!("get_logs");

    async move {
        let Query(params) = params.map_err(|e| {
            tracing::warn!(error = %e, "Rejected log query string");
            ApiError::BadRequest
        })?;

        list_logs(&state.storage, &params).await
    }
    .instrument(span)
    .await
}

/// Normalize the query, then search or list depending on `search_terms`.
/// A missing or empty result is a bad request.
pub async fn list_logs(gateway: &StorageGateway, params: &LogQueryParams) -> ApiResult<DataEnvelope> {
    let query = params.normalize()?;
    let storage = gateway.active();

    let result = match &query {
        LogQuery::Search { terms, options } => {
            tracing::debug!(?terms, limit = ?options.limit, "Searching logs");
            storage.search(terms, options).await?
        }
        LogQuery::List { options } => {
            tracing::debug!(limit = ?options.limit, "Listing logs");
            storage.list(options).await?
        }
    };

    let Some(items) = result.non_empty() else {
        tracing::info!("No logs matched the query");
        return Err(ApiError::BadRequest);
    };

    let data = serialize_many(&items)?;
    tracing::debug!(count = items.len(), "Successfully retrieved logs");

    Ok(DataEnvelope::new(data))
}

/// GET /api/logs/:logId/meta
pub async fn get_log_meta(
    State(state): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> ApiResult<DataEnvelope> {
    let params = match params {
        Ok(Path(params)) => params,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected log meta path");
            HashMap::new()
        }
    };
    let log_id = params.get(LOG_ID_PARAM).map(String::as_str);
    let span = tracing::info_span!("get_log_meta", log_id = log_id.unwrap_or_default());

    fetch_log_meta(&state.storage, log_id).instrument(span).await
}

/// Look up metadata for `log_id`. Backends without metadata support
/// answer with an empty `{}` meta document instead of an error.
pub async fn fetch_log_meta(gateway: &StorageGateway, log_id: Option<&str>) -> ApiResult<DataEnvelope> {
    let Some(log_id) = log_id.filter(|id| !id.trim().is_empty()) else {
        tracing::warn!("Log meta requested without a log id");
        return Err(ApiError::BadRequest);
    };

    let storage = gateway.active();
    let meta = match storage.get_meta(log_id).await {
        Ok(result) => result.item,
        Err(e) if e.is_unsupported() => {
            tracing::debug!(error = %e, "Backend has no log metadata, using empty meta");
            Some(LogMeta::empty(log_id))
        }
        Err(e) => return Err(e.into()),
    };

    let Some(meta) = meta else {
        tracing::info!("No metadata found for log");
        return Err(ApiError::BadRequest);
    };

    Ok(DataEnvelope::new(serialize_one(&meta)?))
}
