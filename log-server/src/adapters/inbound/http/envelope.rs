//! Uniform response envelope
//!
//! Every endpoint answers with either `{ "data": ... }` or
//! `{ "errors": [{ "error": ..., "message": ... }] }`. The error label and
//! message are fixed per status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

use crate::domain::services::query_normalizer::NormalizeError;
use crate::ports::StorageError;

pub const BAD_REQUEST_MESSAGE: &str = "invalid request";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Successful response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataEnvelope {
    pub data: Value,
}

impl DataEnvelope {
    pub fn new(data: Value) -> Self {
        Self { data }
    }
}

impl IntoResponse for DataEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Failed response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorObject {
    pub error: String,
    pub message: String,
}

/// Failure categories an endpoint can answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// 400, caller-correctable
    BadRequest,
    /// 500, anything unexpected
    Internal,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequest => BAD_REQUEST_MESSAGE,
            Self::Internal => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn envelope(self) -> ErrorEnvelope {
        let status = self.status();
        let fallback = match self {
            Self::BadRequest => "Bad Request",
            Self::Internal => "Internal Server Error",
        };

        ErrorEnvelope {
            errors: vec![ErrorObject {
                error: status.canonical_reason().unwrap_or(fallback).to_string(),
                message: self.message().to_string(),
            }],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        Self::Internal
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!(error = %err, "Failed to serialize response payload");
        Self::Internal
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidLimit(_) => {
                tracing::warn!(error = %err, "Rejected log query");
                Self::BadRequest
            }
            NormalizeError::LevelJson(_) => {
                tracing::error!(error = %err, "Failed to parse level_json");
                Self::Internal
            }
        }
    }
}

/// Result type for endpoint orchestrators
pub type ApiResult<T> = Result<T, ApiError>;

/// Response for a handler that panicked, used with `CatchPanicLayer`
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Request handler panicked");

    ApiError::Internal.into_response()
}
