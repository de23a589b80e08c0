//! Request body helpers
//!
//! Bodies follow the `{ "data": { "attributes": { ... } } }` layout.

use serde_json::{Map, Value};

use crate::domain::models::MAX_TTL_SECONDS;

/// The `data.attributes` object of a request body, empty when missing
pub fn extract_attributes(body: &Value) -> Map<String, Value> {
    body.get("data")
        .and_then(|data| data.get("attributes"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Validated input of `PUT /api/logs/retention`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRetentionInput {
    pub ttl: i64,
}

impl UpdateRetentionInput {
    /// `None` when `ttl` is missing, null, not an integer, or outside
    /// `1..=MAX_TTL_SECONDS`. Integer strings such as `"3600"` are accepted.
    pub fn from_attributes(attributes: &Map<String, Value>) -> Option<Self> {
        let ttl = match attributes.get("ttl")? {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };

        (1..=MAX_TTL_SECONDS).contains(&ttl).then_some(Self { ttl })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(body: Value) -> Option<UpdateRetentionInput> {
        UpdateRetentionInput::from_attributes(&extract_attributes(&body))
    }

    #[test]
    fn test_extract_attributes() {
        let attrs = extract_attributes(&json!({ "data": { "attributes": { "ttl": 60 } } }));
        assert_eq!(attrs.get("ttl"), Some(&json!(60)));
    }

    #[test]
    fn test_extract_attributes_missing_layers() {
        assert!(extract_attributes(&json!({})).is_empty());
        assert!(extract_attributes(&json!({ "data": {} })).is_empty());
        assert!(extract_attributes(&json!({ "data": { "attributes": [1] } })).is_empty());
        assert!(extract_attributes(&Value::Null).is_empty());
    }

    #[test]
    fn test_ttl_accepted() {
        assert_eq!(
            input(json!({ "data": { "attributes": { "ttl": 3600 } } })),
            Some(UpdateRetentionInput { ttl: 3600 })
        );
        assert_eq!(
            input(json!({ "data": { "attributes": { "ttl": "86400" } } })),
            Some(UpdateRetentionInput { ttl: 86400 })
        );
    }

    #[test]
    fn test_falsy_ttl_rejected() {
        assert_eq!(input(json!({ "data": { "attributes": {} } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": null } } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": 0 } } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": "" } } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": -5 } } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": 1.5 } } })), None);
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": true } } })), None);
    }

    #[test]
    fn test_ttl_upper_bound() {
        assert_eq!(
            input(json!({ "data": { "attributes": { "ttl": MAX_TTL_SECONDS } } })),
            Some(UpdateRetentionInput { ttl: MAX_TTL_SECONDS })
        );
        assert_eq!(
            input(json!({ "data": { "attributes": { "ttl": MAX_TTL_SECONDS + 1 } } })),
            None
        );
        assert_eq!(
            input(json!({ "data": { "attributes": { "ttl": "10000000000000" } } })),
            None
        );
        assert_eq!(input(json!({ "data": { "attributes": { "ttl": u64::MAX } } })), None);
    }
}
