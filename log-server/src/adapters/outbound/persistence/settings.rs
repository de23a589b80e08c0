//! Settings CRUD operations
//!
//! Implementation of Database methods for the key/value settings table.
//! Values are stored as JSON documents.

use serde::{Deserialize, Serialize};
use sqlx::Row;

use super::Database;
use crate::domain::models::{ItemResult, RetentionConfig};
use crate::ports::StorageResult;

/// Stored form of a retention setting
#[derive(Debug, Serialize, Deserialize)]
struct StoredTtl {
    ttl: i64,
}

impl Database {
    /// Get the retention config stored under `key`, empty result if unset
    pub async fn get_retention_config(&self, key: &str) -> StorageResult<ItemResult<RetentionConfig>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(ItemResult::default());
        };

        let value: String = row.get("value");
        let stored: StoredTtl = serde_json::from_str(&value)?;

        Ok(ItemResult::new(RetentionConfig {
            key: key.to_string(),
            ttl: stored.ttl,
        }))
    }

    /// Save the retention config under `key`
    /// Uses INSERT OR REPLACE for upsert behavior
    pub async fn save_retention_config(
        &self,
        key: &str,
        ttl: i64,
    ) -> StorageResult<ItemResult<RetentionConfig>> {
        let value = serde_json::to_string(&StoredTtl { ttl })?;

        sqlx::query(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key)
        .bind(&value)
        .execute(&self.pool)
        .await?;

        Ok(ItemResult::new(RetentionConfig {
            key: key.to_string(),
            ttl,
        }))
    }
}
