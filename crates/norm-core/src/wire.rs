//! Decoder for the string-keyed JSON criteria encoding.
//!
//! ```json
//! {
//!   "foo": "pre1",
//!   "age!gte": 18,
//!   "!or": [
//!     { "foo": "pre1", "bar2": "pre4" },
//!     { "name!like": "oo" }
//!   ]
//! }
//! ```
//!
//! An object is an AND of its entries. A `field!op` key is a comparison, with
//! `eq` when no operator is given. `!or` takes a list of objects, one OR branch
//! each; a branch with several keys is an AND of them. `!and` takes the same
//! shape and groups its branches with AND, which lets the encoding nest past
//! two levels.
//!
//! Entries are visited in the order they were written, so the resulting tree
//! (and therefore the bound parameter order) follows the caller's text.

use crate::criteria::{FilterNode, Operator};
use crate::query::{Pagination, SortSpec};
use crate::values::{Row, Value};
use serde_json::Map;

pub const OR_KEY: &str = "!or";
pub const AND_KEY: &str = "!and";
pub const OPERATOR_DELIMITER: char = '!';

/// Malformed wire input.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Expected a JSON object for {0}")]
    NotAnObject(&'static str),

    #[error("'{0}' expects a non-empty list of objects")]
    BadGroup(String),

    #[error("Empty branch inside '{0}'")]
    EmptyBranch(String),

    #[error("Field '{0}' must be compared with a scalar value")]
    NonScalar(String),

    #[error("Empty field name in key '{0}'")]
    EmptyField(String),

    #[error("Sort direction for '{0}' must be an integer")]
    BadDirection(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a criteria object. `{}` yields `None` (match every row).
pub fn criteria_from_json(json: &serde_json::Value) -> Result<Option<FilterNode>, WireError> {
    let map = json
        .as_object()
        .ok_or(WireError::NotAnObject("criteria"))?;
    let mut children = decode_entries(map)?;
    Ok(match children.len() {
        0 => None,
        1 => children.pop(),
        _ => Some(FilterNode::and(children)),
    })
}

/// Parse criteria from JSON text.
pub fn criteria_from_str(text: &str) -> Result<Option<FilterNode>, WireError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    criteria_from_json(&json)
}

fn decode_entries(map: &Map<String, serde_json::Value>) -> Result<Vec<FilterNode>, WireError> {
    map.iter()
        .map(|(key, value)| match key.as_str() {
            OR_KEY => decode_group(key, value).map(FilterNode::or),
            AND_KEY => decode_group(key, value).map(FilterNode::and),
            _ => decode_comparison(key, value),
        })
        .collect()
}

fn decode_group(key: &str, value: &serde_json::Value) -> Result<Vec<FilterNode>, WireError> {
    let branches = value
        .as_array()
        .filter(|items| !items.is_empty())
        .ok_or_else(|| WireError::BadGroup(key.to_string()))?;

    branches
        .iter()
        .map(|branch| {
            let map = branch
                .as_object()
                .ok_or_else(|| WireError::BadGroup(key.to_string()))?;
            let mut entries = decode_entries(map)?;
            match entries.len() {
                0 => Err(WireError::EmptyBranch(key.to_string())),
                1 => Ok(entries.remove(0)),
                _ => Ok(FilterNode::and(entries)),
            }
        })
        .collect()
}

fn decode_comparison(key: &str, value: &serde_json::Value) -> Result<FilterNode, WireError> {
    let (field, operator) = match key.split_once(OPERATOR_DELIMITER) {
        Some((field, op)) => (field, op.parse::<Operator>()?),
        None => (key, Operator::default()),
    };
    if field.is_empty() {
        return Err(WireError::EmptyField(key.to_string()));
    }
    if value.is_array() || value.is_object() {
        return Err(WireError::NonScalar(field.to_string()));
    }
    Ok(FilterNode::compare(
        field,
        operator,
        Value::from(value.clone()),
    ))
}

/// Decode a sort spec.
///
/// Accepts `{"field": 1, ...}`, where written key order is precedence, or
/// `[["field", -1], ...]`.
pub fn sorts_from_json(json: &serde_json::Value) -> Result<SortSpec, WireError> {
    let mut sorts = SortSpec::new();
    match json {
        serde_json::Value::Object(map) => {
            for (field, dir) in map {
                sorts.push(field, direction(field, dir)?);
            }
        }
        serde_json::Value::Array(pairs) => {
            for pair in pairs {
                let (field, dir) = pair
                    .as_array()
                    .and_then(|p| match p.as_slice() {
                        [field, dir] => field.as_str().map(|f| (f, dir)),
                        _ => None,
                    })
                    .ok_or(WireError::NotAnObject("sort entry"))?;
                sorts.push(field, direction(field, dir)?);
            }
        }
        _ => return Err(WireError::NotAnObject("sort")),
    }
    Ok(sorts)
}

fn direction(field: &str, dir: &serde_json::Value) -> Result<crate::query::Direction, WireError> {
    dir.as_i64()
        .map(crate::query::Direction::from_signed)
        .ok_or_else(|| WireError::BadDirection(field.to_string()))
}

/// Decode a `{"limit": n, "skip": n}` object. Negative numbers mean unset.
pub fn pagination_from_json(json: &serde_json::Value) -> Result<Pagination, WireError> {
    let map = json
        .as_object()
        .ok_or(WireError::NotAnObject("pagination"))?;
    let limit = map.get("limit").and_then(serde_json::Value::as_i64);
    let offset = map
        .get("skip")
        .or_else(|| map.get("offset"))
        .and_then(serde_json::Value::as_i64);
    Ok(Pagination::from_signed(limit, offset))
}

/// Decode a row object (insert values or update sets).
pub fn row_from_json(json: &serde_json::Value) -> Result<Row, WireError> {
    let map = json.as_object().ok_or(WireError::NotAnObject("row"))?;
    Ok(map
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.clone())))
        .collect())
}

/// Decode a single row object or a list of row objects.
pub fn rows_from_json(json: &serde_json::Value) -> Result<Vec<Row>, WireError> {
    match json {
        serde_json::Value::Array(items) => items.iter().map(row_from_json).collect(),
        other => Ok(vec![row_from_json(other)?]),
    }
}
