//! Logical field resolution over heterogeneous partition schemas.
//!
//! Each logical field has a fixed, ordered list of key aliases. A field
//! resolves to the first alias holding a non-missing value.

use serde_json::Value;

use crate::types::RawRecord;

/// Title aliases, in priority order.
pub const TITLE_KEYS: &[&str] = &["title", "Title", "Movie Name"];
/// Product code aliases, in priority order.
pub const NUMBER_KEYS: &[&str] = &["number", "Number"];
/// Magnet link aliases, in priority order.
pub const MAGNET_KEYS: &[&str] = &["magnet", "Magnet Links"];
/// Size aliases, in priority order.
pub const SIZE_KEYS: &[&str] = &["size_mb", "size", "Movie Size"];
/// Partition-local numeric id aliases, in priority order.
pub const ID_KEYS: &[&str] = &["tid", "id"];
/// Internal identity assigned by the store.
pub const IDENTITY_KEY: &str = "_id";

/// Text values treated as missing (compared case-insensitively after trim).
const INVALID_TEXT_VALUES: &[&str] = &["", "none", "null"];

/// Every field the normaliser reads. Passed to the store as a projection.
pub const SEARCH_PROJECTION: &[&str] = &[
    "title",
    "Title",
    "Movie Name",
    "number",
    "Number",
    "magnet",
    "Magnet Links",
    "size_mb",
    "size",
    "Movie Size",
    "tid",
    "id",
];

/// Render a JSON value as trimmed text, mapping missing markers to `""`.
///
/// Strings are used as-is; numbers and booleans use their JSON rendering;
/// `null`, arrays and objects are missing.
pub fn clean_text(value: Option<&Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => return String::new(),
    };
    if INVALID_TEXT_VALUES.contains(&text.to_lowercase().as_str()) {
        return String::new();
    }
    text
}

/// Return the cleaned text of the first alias with a non-missing value.
pub fn first_present(record: &RawRecord, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| clean_text(record.get(key)))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Resolve the result id.
///
/// Uses the first id alias whose text parses as an integer, else the last
/// eight characters of the internal identity read as hex, else 0.
pub fn extract_numeric_id(record: &RawRecord) -> i64 {
    for key in ID_KEYS {
        if let Some(id) = record.get(key).and_then(parse_integer) {
            return id;
        }
    }
    identity_text(record.get(IDENTITY_KEY))
        .and_then(|identity| {
            let tail_start = identity
                .char_indices()
                .rev()
                .nth(7)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            i64::from_str_radix(&identity[tail_start..], 16).ok()
        })
        .unwrap_or(0)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text form of a store identity, accepting extended-JSON `{"$oid": ...}`.
fn identity_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}
