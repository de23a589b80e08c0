//! Log query normalization
//!
//! Turns the raw string query parameters of `GET /api/logs` into a typed
//! [`LogQuery`]. Pure, no I/O.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::models::{LevelFilter, LogQueryOptions};

/// Raw query parameters as they arrive on the wire
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LogQueryParams {
    #[serde(default)]
    pub search_terms: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub level_json: Option<String>,
}

/// Normalized query, either a term search or a plain listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogQuery {
    Search {
        terms: Vec<String>,
        options: LogQueryOptions,
    },
    List {
        options: LogQueryOptions,
    },
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// `limit` is not a non-negative integer
    #[error("invalid limit '{0}'")]
    InvalidLimit(String),

    /// `level_json` is not a JSON array of level filters
    #[error("malformed level_json: {0}")]
    LevelJson(#[from] serde_json::Error),
}

impl LogQueryParams {
    pub fn normalize(&self) -> Result<LogQuery, NormalizeError> {
        let mut options = LogQueryOptions {
            limit: parse_limit(self.limit.as_deref())?,
            level_json: parse_level_json(self.level_json.as_deref())?,
            search_terms: None,
        };

        match self.search_terms.as_deref() {
            Some(raw) if !raw.is_empty() => {
                let terms = split_search_terms(raw);
                options.search_terms = Some(raw.to_string());
                Ok(LogQuery::Search { terms, options })
            }
            _ => Ok(LogQuery::List { options }),
        }
    }
}

fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, NormalizeError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| NormalizeError::InvalidLimit(value.to_string())),
    }
}

fn parse_level_json(raw: Option<&str>) -> Result<Option<Vec<LevelFilter>>, NormalizeError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let mut filters: Vec<LevelFilter> = serde_json::from_str(raw)?;
    // Storage always gets at least one filter slot
    if filters.is_empty() {
        filters.push(LevelFilter::default());
    }
    Ok(Some(filters))
}

/// Split a comma-separated term list, keeping order and dropping blanks
pub fn split_search_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
