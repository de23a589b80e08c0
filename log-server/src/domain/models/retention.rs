// log-server/src/domain/models/retention.rs
//
// Log retention (time-to-live) configuration.
// A single record stored under the "logsTTL" settings key.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted retention, 100 years in seconds
pub const MAX_TTL_SECONDS: i64 = 36_525 * 24 * 60 * 60;

/// Settings key holding the log retention configuration
pub const LOGS_TTL_KEY: &str = "logsTTL";

/// Retention configuration, `ttl` in seconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetentionConfig {
    pub key: String,
    pub ttl: i64,
}

impl RetentionConfig {
    pub fn logs_ttl(ttl: i64) -> Self {
        Self {
            key: LOGS_TTL_KEY.to_string(),
            ttl,
        }
    }
}

/// Oldest timestamp kept under a retention of `ttl` seconds from `now`.
/// `None` when the cutoff falls outside the representable range.
pub fn retention_cutoff(now: DateTime<Utc>, ttl: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(ttl).and_then(|ttl| now.checked_sub_signed(ttl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_cutoff() {
        let now = Utc::now();
        assert_eq!(retention_cutoff(now, 60), Some(now - TimeDelta::seconds(60)));
        assert!(retention_cutoff(now, MAX_TTL_SECONDS).is_some());
    }

    #[test]
    fn test_retention_cutoff_out_of_range() {
        let now = Utc::now();
        assert_eq!(retention_cutoff(now, 10_000_000_000_000), None);
        assert_eq!(retention_cutoff(now, i64::MAX), None);
    }
}
