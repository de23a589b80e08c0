// log-server/src/domain/models/log_record.rs
//
// Log record model served by the logs API.
// Records are owned by the storage backend and read-only for the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted log record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<String>,
}

impl LogRecord {
    /// Create a record stamped with the current time and a fresh id
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: level.into().to_uppercase(),
            message: message.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Case-insensitive substring match against any of the given terms
    pub fn matches_any(&self, terms: &[String]) -> bool {
        let message = self.message.to_lowercase();
        terms
            .iter()
            .any(|term| message.contains(&term.to_lowercase()))
    }
}
