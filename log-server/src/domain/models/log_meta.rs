// log-server/src/domain/models/log_meta.rs
//
// Auxiliary per-log metadata, keyed by log id.

use serde::{Deserialize, Serialize};

/// Metadata attached to a single log record.
/// `meta` is a JSON document encoded as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogMeta {
    pub id: String,
    pub meta: String,
}

impl LogMeta {
    /// Empty metadata for a log whose backend cannot store any
    pub fn empty(log_id: impl Into<String>) -> Self {
        Self {
            id: log_id.into(),
            meta: "{}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_meta() {
        let meta = LogMeta::empty("log-1");
        assert_eq!(meta.id, "log-1");
        assert_eq!(meta.meta, "{}");
    }
}
