//! Log record queries
//!
//! Implementation of Database methods for reading log records and their
//! metadata, plus the retention sweep.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};

use super::{format_timestamp, parse_timestamp, Database};
use crate::domain::models::{
    retention_cutoff, ItemResult, ItemsResult, LogMeta, LogQueryOptions, LogRecord,
};
use crate::ports::{StorageError, StorageResult};

impl Database {
    /// Insert a record with optional metadata (JSON string, `{}` when absent)
    pub async fn insert_log(&self, record: &LogRecord, meta: Option<&str>) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO logs (id, timestamp, level, message, target, meta) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(format_timestamp(&record.timestamp))
        .bind(record.level.to_uppercase())
        .bind(&record.message)
        .bind(&record.target)
        .bind(meta.unwrap_or("{}"))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_logs(&self, options: &LogQueryOptions) -> StorageResult<ItemsResult<LogRecord>> {
        self.select_logs(options, &[]).await
    }

    /// Records whose message contains any of `terms`, case-insensitively.
    /// No terms matches nothing.
    pub async fn search_logs(
        &self,
        terms: &[String],
        options: &LogQueryOptions,
    ) -> StorageResult<ItemsResult<LogRecord>> {
        if terms.is_empty() {
            return Ok(ItemsResult::new(vec![]));
        }
        self.select_logs(options, terms).await
    }

    async fn select_logs(
        &self,
        options: &LogQueryOptions,
        terms: &[String],
    ) -> StorageResult<ItemsResult<LogRecord>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, timestamp, level, message, target FROM logs WHERE 1 = 1",
        );

        let levels = options.levels();
        if !levels.is_empty() {
            query.push(" AND level IN (");
            let mut separated = query.separated(", ");
            for level in levels {
                separated.push_bind(level);
            }
            separated.push_unseparated(")");
        }

        if !terms.is_empty() {
            query.push(" AND (");
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                query.push("LOWER(message) LIKE ");
                query.push_bind(like_pattern(term));
                query.push(" ESCAPE '\\'");
            }
            query.push(")");
        }

        query.push(" ORDER BY timestamp DESC");

        if let Some(limit) = options.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::from(limit));
        }

        let rows = query.build().fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(row_to_record)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(ItemsResult::new(items))
    }

    pub async fn get_log_meta(&self, log_id: &str) -> StorageResult<ItemResult<LogMeta>> {
        let row = sqlx::query("SELECT id, meta FROM logs WHERE id = ?")
            .bind(log_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .map(|row| LogMeta {
                id: row.get("id"),
                meta: row.get("meta"),
            })
            .into())
    }

    /// Delete records older than `ttl` seconds, returning how many went
    pub async fn delete_logs_older_than(&self, ttl: i64) -> StorageResult<u64> {
        let cutoff = retention_cutoff(Utc::now(), ttl)
            .ok_or_else(|| StorageError::Other(format!("ttl {} out of range", ttl)))?;
        let cutoff = format_timestamp(&cutoff);

        let result = sqlx::query("DELETE FROM logs WHERE timestamp < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn row_to_record(row: &SqliteRow) -> StorageResult<LogRecord> {
    let timestamp: String = row.try_get("timestamp")?;

    Ok(LogRecord {
        id: row.try_get("id")?,
        timestamp: parse_timestamp(&timestamp)?,
        level: row.try_get("level")?,
        message: row.try_get("message")?,
        target: row.try_get("target")?,
    })
}

/// `%term%` with LIKE wildcards in the term escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
