use crate::domain::models::{ItemResult, ItemsResult, LogMeta, LogQueryOptions, LogRecord, RetentionConfig};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a storage operation
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend does not implement this operation at all
    #[error("operation not available: {operation}")]
    Unsupported { operation: &'static str },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored value: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl StorageError {
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Abstract access to persisted logs and their retention configuration
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogStorage: Send + Sync {
    /// Logs whose message matches any of `terms`
    async fn search(
        &self,
        terms: &[String],
        options: &LogQueryOptions,
    ) -> StorageResult<ItemsResult<LogRecord>>;

    /// Logs matching the level filters, newest first
    async fn list(&self, options: &LogQueryOptions) -> StorageResult<ItemsResult<LogRecord>>;

    /// Read the retention config stored under `key`
    async fn get_config(&self, key: &str) -> StorageResult<ItemResult<RetentionConfig>>;

    /// Store `ttl` under `key`, returning the updated config
    async fn set_config(&self, key: &str, ttl: i64) -> StorageResult<ItemResult<RetentionConfig>>;

    /// Make the backend apply a retention of `ttl` seconds
    async fn ensure_retention(&self, ttl: i64) -> StorageResult<()>;

    /// Per-log metadata. Backends without metadata return `Unsupported`.
    async fn get_meta(&self, log_id: &str) -> StorageResult<ItemResult<LogMeta>>;
}
