//! Core types: raw partition records and the canonical result shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder seeder count reported for every result.
pub const PLACEHOLDER_SEEDERS: u32 = 999;

/// One schema-flexible document read from a partition.
///
/// Field names vary per partition; see [`crate::normalize::fields`] for the
/// alias lists used to resolve logical fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets `key` to `value`, returning `self` for chaining.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    /// Keeps only the fields named in `projection`.
    ///
    /// The internal identity field `_id` is always retained.
    pub fn project(&self, projection: &[&str]) -> Self {
        let fields = self
            .0
            .iter()
            .filter(|(key, _)| key.as_str() == "_id" || projection.contains(&key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self(fields)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A normalised search hit, identical in shape across partitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Partition-local numeric id, or a fallback derived from `_id`.
    pub id: i64,
    /// Site label from the engine settings.
    pub site: String,
    /// Name of the partition this result came from.
    pub partition: String,
    /// Size in MiB, rounded to two decimals.
    pub size_mb: f64,
    /// Constant placeholder.
    pub seeders: u32,
    /// Composed display title. Never empty.
    pub title: String,
    /// Product code, kept separately for ranking. Empty when missing.
    pub number: String,
    /// Subtitled release.
    pub chinese: bool,
    /// Uncensored release.
    pub uc: bool,
    /// 4K release.
    pub uhd: bool,
    /// Constant placeholder.
    pub free: bool,
    /// Canonical magnet link.
    pub download_url: String,
}

/// Final response of one search call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Number of entries in `data`.
    pub total: usize,
    /// Deduplicated, sorted results.
    pub data: Vec<CanonicalResult>,
}

impl SearchResponse {
    /// The empty response returned for rejected input.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<Vec<CanonicalResult>> for SearchResponse {
    fn from(data: Vec<CanonicalResult>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}
