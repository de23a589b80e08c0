//! Resource serializer
//!
//! Renders domain objects as `{ "type", "id", "attributes" }` resource
//! objects for the `data` member of the response envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::models::{LogMeta, LogRecord, RetentionConfig};

/// A domain object that can be rendered as a resource object
pub trait Resource {
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn attributes(&self) -> serde_json::Result<Value>;
}

#[derive(Serialize)]
struct ResourceObject<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
    attributes: Value,
}

pub fn serialize_one<R: Resource>(resource: &R) -> serde_json::Result<Value> {
    serde_json::to_value(ResourceObject {
        kind: R::KIND,
        id: resource.id(),
        attributes: resource.attributes()?,
    })
}

pub fn serialize_many<R: Resource>(resources: &[R]) -> serde_json::Result<Value> {
    resources
        .iter()
        .map(serialize_one)
        .collect::<serde_json::Result<Vec<_>>>()
        .map(Value::Array)
}

#[derive(Serialize)]
struct LogAttributes<'a> {
    timestamp: &'a DateTime<Utc>,
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
}

impl Resource for LogRecord {
    const KIND: &'static str = "log";

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> serde_json::Result<Value> {
        serde_json::to_value(LogAttributes {
            timestamp: &self.timestamp,
            level: &self.level,
            message: &self.message,
            target: self.target.as_deref(),
        })
    }
}

impl Resource for RetentionConfig {
    const KIND: &'static str = "config";

    fn id(&self) -> &str {
        &self.key
    }

    fn attributes(&self) -> serde_json::Result<Value> {
        Ok(serde_json::json!({ "ttl": self.ttl }))
    }
}

impl Resource for LogMeta {
    const KIND: &'static str = "logMeta";

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> serde_json::Result<Value> {
        Ok(serde_json::json!({ "meta": self.meta }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_retention_config() {
        let value = serialize_one(&RetentionConfig::logs_ttl(3600)).unwrap();
        assert_eq!(
            value,
            json!({ "type": "config", "id": "logsTTL", "attributes": { "ttl": 3600 } })
        );
    }

    #[test]
    fn test_serialize_log_meta() {
        let value = serialize_one(&LogMeta::empty("log-7")).unwrap();
        assert_eq!(
            value,
            json!({ "type": "logMeta", "id": "log-7", "attributes": { "meta": "{}" } })
        );
    }

    #[test]
    fn test_serialize_logs_keeps_order() {
        let first = LogRecord::new("INFO", "first").with_target("logvault");
        let second = LogRecord::new("ERROR", "second");

        let value = serialize_many(&[first.clone(), second.clone()]).unwrap();
        let array = value.as_array().unwrap();

        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["type"], "log");
        assert_eq!(array[0]["id"], first.id.as_str());
        assert_eq!(array[0]["attributes"]["message"], "first");
        assert_eq!(array[0]["attributes"]["target"], "logvault");
        assert_eq!(array[1]["attributes"]["level"], "ERROR");
        assert!(array[1]["attributes"].get("target").is_none());
    }
}
