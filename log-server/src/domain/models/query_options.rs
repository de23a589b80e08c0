// log-server/src/domain/models/query_options.rs
//
// Typed log query options handed to the storage layer, plus the
// result shapes storage operations return.

use serde::{Deserialize, Serialize};

/// One level filter slot, `{ "level": "ERROR" }` or `{}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelFilter {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub level: Option<String>,
}

impl LevelFilter {
    pub fn level(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
        }
    }
}

/// Options for listing or searching logs.
/// Absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogQueryOptions {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub level_json: Option<Vec<LevelFilter>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub search_terms: Option<String>,
}

impl LogQueryOptions {
    /// Upper-cased levels requested by the filters.
    /// Empty when no filter names a level, meaning "all levels".
    pub fn levels(&self) -> Vec<String> {
        self.level_json
            .iter()
            .flatten()
            .filter_map(|filter| filter.level.as_deref())
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .map(str::to_uppercase)
            .collect()
    }

    pub fn accepts_level(&self, level: &str) -> bool {
        let levels = self.levels();
        levels.is_empty() || levels.iter().any(|l| l.eq_ignore_ascii_case(level))
    }
}

/// Collection result of a storage operation.
/// `Default` is the empty `{}` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemsResult<T> {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<Vec<T>>,
}

impl<T> Default for ItemsResult<T> {
    fn default() -> Self {
        Self { items: None }
    }
}

impl<T> ItemsResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items: Some(items) }
    }

    /// Items, only when present and non-empty
    pub fn non_empty(self) -> Option<Vec<T>> {
        self.items.filter(|items| !items.is_empty())
    }
}

/// Single-item result of a storage operation.
/// `Default` is the empty `{}` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemResult<T> {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub item: Option<T>,
}

impl<T> Default for ItemResult<T> {
    fn default() -> Self {
        Self { item: None }
    }
}

impl<T> ItemResult<T> {
    pub fn new(item: T) -> Self {
        Self { item: Some(item) }
    }
}

impl<T> From<Option<T>> for ItemResult<T> {
    fn from(item: Option<T>) -> Self {
        Self { item }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_omit_absent_fields() {
        let options = LogQueryOptions {
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({ "limit": 10 })
        );
    }

    #[test]
    fn test_levels_ignore_empty_slots() {
        let options = LogQueryOptions {
            level_json: Some(vec![
                LevelFilter::default(),
                LevelFilter::level("error"),
                LevelFilter::level(" "),
            ]),
            ..Default::default()
        };
        assert_eq!(options.levels(), vec!["ERROR".to_string()]);
        assert!(options.accepts_level("ERROR"));
        assert!(!options.accepts_level("INFO"));
    }

    #[test]
    fn test_no_levels_accepts_everything() {
        let options = LogQueryOptions {
            level_json: Some(vec![LevelFilter::default()]),
            ..Default::default()
        };
        assert!(options.levels().is_empty());
        assert!(options.accepts_level("DEBUG"));
    }

    #[test]
    fn test_items_result_non_empty() {
        assert_eq!(ItemsResult::<i32>::default().non_empty(), None);
        assert_eq!(ItemsResult::<i32>::new(vec![]).non_empty(), None);
        assert_eq!(ItemsResult::new(vec![1]).non_empty(), Some(vec![1]));
    }

    #[test]
    fn test_empty_results_serialize_as_empty_object() {
        assert_eq!(
            serde_json::to_value(ItemsResult::<i32>::default()).unwrap(),
            serde_json::json!({})
        );
        assert_eq!(
            serde_json::to_value(ItemResult::<i32>::default()).unwrap(),
            serde_json::json!({})
        );
    }
}
