//! In-process document store.
//!
//! Holds partitions as insertion-ordered record lists behind an async
//! read-write lock. Searches only take the read side, so any number of
//! partition queries can run concurrently while appends wait.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::SearchError;
use crate::query::Predicate;
use crate::types::RawRecord;

#[derive(Debug, Clone)]
enum Partition {
    Records(Vec<RawRecord>),
    /// The partition exists but cannot be served (e.g. a corrupt source file).
    Unavailable(String),
}

/// A [`DocumentStore`] backed by in-memory record lists.
///
/// Unknown partitions behave like empty collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<String, Partition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemoryStore::extend`] for unshared stores.
    pub fn with_partition(
        mut self,
        name: impl Into<String>,
        records: impl IntoIterator<Item = RawRecord>,
    ) -> Self {
        append(self.partitions.get_mut(), name.into(), records);
        self
    }

    /// Builder-style variant of [`MemoryStore::mark_unavailable`].
    pub fn with_unavailable(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.partitions
            .get_mut()
            .insert(name.into(), Partition::Unavailable(reason.into()));
        self
    }

    /// Append one record to `partition`, creating it if needed.
    pub async fn insert(&self, partition: &str, record: RawRecord) {
        self.extend(partition, std::iter::once(record)).await;
    }

    /// Append records to `partition` in iteration order.
    ///
    /// Appending to an unavailable partition replaces it with a fresh one.
    pub async fn extend(&self, partition: &str, records: impl IntoIterator<Item = RawRecord>) {
        let mut partitions = self.partitions.write().await;
        append(&mut partitions, partition.to_owned(), records);
    }

    /// Make every query against `partition` fail with `reason`.
    pub async fn mark_unavailable(&self, partition: &str, reason: impl Into<String>) {
        self.partitions
            .write()
            .await
            .insert(partition.to_owned(), Partition::Unavailable(reason.into()));
    }

    /// Number of records stored in `partition` (0 if unknown or unavailable).
    pub async fn partition_len(&self, partition: &str) -> usize {
        match self.partitions.read().await.get(partition) {
            Some(Partition::Records(records)) => records.len(),
            _ => 0,
        }
    }

    /// Names of all known partitions, sorted.
    pub async fn partition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.partitions.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

fn append(
    partitions: &mut HashMap<String, Partition>,
    name: String,
    records: impl IntoIterator<Item = RawRecord>,
) {
    let entry = partitions
        .entry(name)
        .or_insert_with(|| Partition::Records(Vec::new()));
    if let Partition::Unavailable(_) = entry {
        *entry = Partition::Records(Vec::new());
    }
    if let Partition::Records(existing) = entry {
        existing.extend(records);
    }
}

impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        partition: &str,
        predicate: &Predicate,
    ) -> Result<Vec<RawRecord>, SearchError> {
        let compiled = predicate.compile()?;
        let partitions = self.partitions.read().await;
        match partitions.get(partition) {
            None => Ok(Vec::new()),
            Some(Partition::Unavailable(reason)) => Err(SearchError::Store(format!(
                "partition {partition} unavailable: {reason}"
            ))),
            Some(Partition::Records(records)) => Ok(records
                .iter()
                .rev()
                .filter(|record| compiled.matches(record))
                .map(|record| record.project(predicate.projection))
                .collect()),
        }
    }
}
