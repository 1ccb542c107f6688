//! Batched partition fan-out.
//!
//! Partitions are split into fixed-size batches. Batches run one after
//! another; the partitions of a batch are queried concurrently and the
//! batch finishes only when all of them have. Peak concurrency against
//! the store is therefore the batch size.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::normalize::RecordNormalizer;
use crate::query::Predicate;
use crate::store::DocumentStore;
use crate::types::CanonicalResult;

use super::partition::query_partition;

/// Merged output of every batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Results in batch order, then worker-completion order within a batch.
    pub results: Vec<CanonicalResult>,
    /// Partitions whose query failed and contributed nothing.
    pub failed_partitions: Vec<String>,
}

/// Split `partitions` into batches of `batch_size` (at least 1), keeping order.
pub fn chunk_partitions(partitions: &[String], batch_size: usize) -> Vec<&[String]> {
    partitions.chunks(batch_size.max(1)).collect()
}

/// Run `predicate` against every partition, batch by batch.
///
/// A failing partition is logged and contributes no results; the
/// remaining partitions are unaffected. Results are appended as workers
/// complete, so order within a batch follows completion timing.
pub async fn run_batches<S: DocumentStore>(
    store: &S,
    partitions: &[String],
    batch_size: usize,
    predicate: &Predicate,
    normalizer: &RecordNormalizer,
) -> BatchOutcome {
    let batches = chunk_partitions(partitions, batch_size);
    let batch_count = batches.len();
    let mut outcome = BatchOutcome::default();

    for (index, batch) in batches.into_iter().enumerate() {
        tracing::info!(
            batch = index + 1,
            of = batch_count,
            partitions = ?batch,
            mode = %predicate.mode,
            "querying batch"
        );

        let mut workers: FuturesUnordered<_> = batch
            .iter()
            .map(|partition| async move {
                let result = query_partition(store, partition, predicate, normalizer).await;
                (partition, result)
            })
            .collect();

        while let Some((partition, result)) = workers.next().await {
            match result {
                Ok(results) => outcome.results.extend(results),
                Err(err) => {
                    tracing::error!(partition = %partition, error = %err, "partition query failed");
                    outcome.failed_partitions.push(partition.clone());
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::query::build_fuzzy_predicate;
    use crate::store::MemoryStore;
    use crate::types::RawRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    fn hit(number: &str, hash: char) -> RawRecord {
        RawRecord::new()
            .with("number", number)
            .with("magnet", format!("magnet:?xt=urn:btih:{}", hash.to_string().repeat(32)))
    }

    #[test]
    fn chunking_keeps_order_and_remainder() {
        let partitions = names(&["a", "b", "c", "d", "e"]);
        let batches = chunk_partitions(&partitions, 2);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], &partitions[0..2]);
        assert_eq!(batches[2], &partitions[4..5]);
    }

    #[test]
    fn zero_batch_size_treated_as_one() {
        let partitions = names(&["a", "b"]);
        assert_eq!(chunk_partitions(&partitions, 0).len(), 2);
    }

    #[test]
    fn empty_partition_list_has_no_batches() {
        assert!(chunk_partitions(&[], 3).is_empty());
    }

    /// Store that records the peak number of in-flight queries.
    struct GaugedStore {
        inner: MemoryStore,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl DocumentStore for GaugedStore {
        async fn find(
            &self,
            partition: &str,
            predicate: &Predicate,
        ) -> Result<Vec<RawRecord>, SearchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            let result = self.inner.find(partition, predicate).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    #[tokio::test]
    async fn concurrency_bounded_by_batch_size() {
        let partitions = names(&["a", "b", "c", "d", "e"]);
        let mut inner = MemoryStore::new();
        for (i, name) in partitions.iter().enumerate() {
            let hash = char::from(b'a' + i as u8);
            inner = inner.with_partition(name.clone(), vec![hit(&format!("ABC-00{i}"), hash)]);
        }
        let store = GaugedStore {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };

        let outcome = run_batches(
            &store,
            &partitions,
            2,
            &build_fuzzy_predicate("abc"),
            &RecordNormalizer::new("", "Site"),
        )
        .await;

        assert_eq!(outcome.results.len(), 5);
        assert_eq!(store.peak.load(Ordering::SeqCst), 2);
        assert!(outcome.failed_partitions.is_empty());
    }

    #[tokio::test]
    async fn failed_partition_contributes_nothing() {
        let store = MemoryStore::new()
            .with_partition("ok", vec![hit("ABC-001", 'a')])
            .with_unavailable("bad", "connection reset");
        let outcome = run_batches(
            &store,
            &names(&["bad", "ok"]),
            2,
            &build_fuzzy_predicate("abc"),
            &RecordNormalizer::new("", "Site"),
        )
        .await;
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.failed_partitions, vec!["bad".to_string()]);
    }

    #[tokio::test]
    async fn batches_merge_in_batch_order() {
        let store = MemoryStore::new()
            .with_partition("first", vec![hit("ABC-001", 'a')])
            .with_partition("second", vec![hit("ABC-002", 'b')]);
        let outcome = run_batches(
            &store,
            &names(&["first", "second"]),
            1,
            &build_fuzzy_predicate("abc"),
            &RecordNormalizer::new("", "Site"),
        )
        .await;
        let order: Vec<&str> = outcome.results.iter().map(|r| r.partition.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }
}
