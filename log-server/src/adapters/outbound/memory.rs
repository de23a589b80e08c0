//! In-memory storage backend
//!
//! Serves the server's own log records captured by the tracing
//! [`LogBuffer`](crate::adapters::infrastructure::log_buffer::LogBuffer).
//! Settings live only for the lifetime of the process and per-log metadata
//! is not available.

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::adapters::infrastructure::log_buffer::LogBuffer;
use crate::domain::models::{
    retention_cutoff, ItemResult, ItemsResult, LogMeta, LogQueryOptions, LogRecord, RetentionConfig,
};
use crate::ports::{StorageError, StorageResult};

pub struct MemoryLogStore {
    buffer: LogBuffer,
    settings: RwLock<HashMap<String, i64>>,
}

impl MemoryLogStore {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            settings: RwLock::new(HashMap::new()),
        }
    }

    async fn collect<F>(&self, options: &LogQueryOptions, matches: F) -> ItemsResult<LogRecord>
    where
        F: Fn(&LogRecord) -> bool,
    {
        let limit = options.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let buffer = self.buffer.read().await;

        let items = buffer
            .iter()
            .filter(|record| options.accepts_level(&record.level))
            .filter(|record| matches(record))
            .take(limit)
            .cloned()
            .collect();

        ItemsResult::new(items)
    }

    pub async fn search(&self, terms: &[String], options: &LogQueryOptions) -> ItemsResult<LogRecord> {
        self.collect(options, |record| record.matches_any(terms)).await
    }

    pub async fn list(&self, options: &LogQueryOptions) -> ItemsResult<LogRecord> {
        self.collect(options, |_| true).await
    }

    pub async fn get_config(&self, key: &str) -> ItemResult<RetentionConfig> {
        let settings = self.settings.read().await;
        settings
            .get(key)
            .map(|ttl| RetentionConfig {
                key: key.to_string(),
                ttl: *ttl,
            })
            .into()
    }

    pub async fn set_config(&self, key: &str, ttl: i64) -> ItemResult<RetentionConfig> {
        self.settings.write().await.insert(key.to_string(), ttl);
        ItemResult::new(RetentionConfig {
            key: key.to_string(),
            ttl,
        })
    }

    /// Drop buffered records older than `ttl` seconds, returning how many went
    pub async fn ensure_retention(&self, ttl: i64) -> StorageResult<usize> {
        let cutoff = retention_cutoff(Utc::now(), ttl)
            .ok_or_else(|| StorageError::Other(format!("ttl {} out of range", ttl)))?;
        let mut buffer = self.buffer.write().await;
        let before = buffer.len();
        buffer.retain(|record| record.timestamp >= cutoff);
        Ok(before - buffer.len())
    }

    pub async fn get_meta(&self, _log_id: &str) -> StorageResult<ItemResult<LogMeta>> {
        Err(StorageError::unsupported("get_meta"))
    }
}
