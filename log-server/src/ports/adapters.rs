// Adapter implementations for outbound ports
//
// This module implements the LogStorage port on the concrete backends,
// bridging the HTTP handlers with the actual infrastructure.

use async_trait::async_trait;

use super::{LogStorage, StorageResult};
use crate::adapters::outbound::memory::MemoryLogStore;
use crate::adapters::outbound::persistence::Database;
use crate::domain::models::{ItemResult, ItemsResult, LogMeta, LogQueryOptions, LogRecord, RetentionConfig};

// ============================================================================
// SQLite Adapter
// ============================================================================

#[async_trait]
impl LogStorage for Database {
    async fn search(
        &self,
        terms: &[String],
        options: &LogQueryOptions,
    ) -> StorageResult<ItemsResult<LogRecord>> {
        self.search_logs(terms, options).await
    }

    async fn list(&self, options: &LogQueryOptions) -> StorageResult<ItemsResult<LogRecord>> {
        self.list_logs(options).await
    }

    async fn get_config(&self, key: &str) -> StorageResult<ItemResult<RetentionConfig>> {
        self.get_retention_config(key).await
    }

    async fn set_config(&self, key: &str, ttl: i64) -> StorageResult<ItemResult<RetentionConfig>> {
        self.save_retention_config(key, ttl).await
    }

    async fn ensure_retention(&self, ttl: i64) -> StorageResult<()> {
        let deleted = self.delete_logs_older_than(ttl).await?;
        tracing::info!(ttl, deleted, "Applied log retention");
        Ok(())
    }

    async fn get_meta(&self, log_id: &str) -> StorageResult<ItemResult<LogMeta>> {
        self.get_log_meta(log_id).await
    }
}

// ============================================================================
// In-memory Adapter
// ============================================================================

#[async_trait]
impl LogStorage for MemoryLogStore {
    async fn search(
        &self,
        terms: &[String],
        options: &LogQueryOptions,
    ) -> StorageResult<ItemsResult<LogRecord>> {
        Ok(MemoryLogStore::search(self, terms, options).await)
    }

    async fn list(&self, options: &LogQueryOptions) -> StorageResult<ItemsResult<LogRecord>> {
        Ok(MemoryLogStore::list(self, options).await)
    }

    async fn get_config(&self, key: &str) -> StorageResult<ItemResult<RetentionConfig>> {
        Ok(MemoryLogStore::get_config(self, key).await)
    }

    async fn set_config(&self, key: &str, ttl: i64) -> StorageResult<ItemResult<RetentionConfig>> {
        Ok(MemoryLogStore::set_config(self, key, ttl).await)
    }

    async fn ensure_retention(&self, ttl: i64) -> StorageResult<()> {
        let pruned = MemoryLogStore::ensure_retention(self, ttl).await?;
        tracing::info!(ttl, pruned, "Applied log retention to in-memory buffer");
        Ok(())
    }

    async fn get_meta(&self, log_id: &str) -> StorageResult<ItemResult<LogMeta>> {
        MemoryLogStore::get_meta(self, log_id).await
    }
}
