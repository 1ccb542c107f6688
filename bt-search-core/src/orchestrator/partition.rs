//! Single-partition query with local deduplication.

use std::collections::HashSet;

use crate::error::SearchError;
use crate::normalize::RecordNormalizer;
use crate::query::Predicate;
use crate::store::DocumentStore;
use crate::types::CanonicalResult;

/// Query one partition and normalise its matches.
///
/// Records arrive newest-first. A record is dropped when its canonical
/// magnet is empty, when that magnet was already seen in this partition,
/// or when its composed title was already seen. The most recent record
/// therefore wins.
///
/// # Errors
///
/// Propagates the store's error unchanged. Callers decide how a failed
/// partition contributes to the overall search.
pub async fn query_partition<S: DocumentStore>(
    store: &S,
    partition: &str,
    predicate: &Predicate,
    normalizer: &RecordNormalizer,
) -> Result<Vec<CanonicalResult>, SearchError> {
    let records = store.find(partition, predicate).await?;
    tracing::info!(partition, matched = records.len(), "partition matched documents");

    let mut seen_magnets: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut results = Vec::with_capacity(records.len());

    for record in &records {
        let result = normalizer.normalize(record, partition);
        if result.download_url.is_empty()
            || seen_magnets.contains(&result.download_url)
            || seen_titles.contains(&result.title)
        {
            continue;
        }
        seen_magnets.insert(result.download_url.clone());
        seen_titles.insert(result.title.clone());
        results.push(result);
    }

    tracing::debug!(partition, kept = results.len(), "partition after local dedup");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_fuzzy_predicate;
    use crate::store::MemoryStore;
    use crate::types::RawRecord;

    fn magnet(hash_digit: char) -> String {
        format!("magnet:?xt=urn:btih:{}", hash_digit.to_string().repeat(40))
    }

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new("[B]", "Site")
    }

    #[tokio::test]
    async fn duplicate_magnet_keeps_most_recent() {
        let store = MemoryStore::new().with_partition(
            "p",
            vec![
                RawRecord::new()
                    .with("number", "ABC-001")
                    .with("magnet", format!("{}&tr=old", magnet('a'))),
                RawRecord::new()
                    .with("number", "ABC-002")
                    .with("magnet", format!("{}&tr=new", magnet('a'))),
            ],
        );
        let results = query_partition(&store, "p", &build_fuzzy_predicate("abc"), &normalizer())
            .await
            .expect("query");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number, "ABC-002");
    }

    #[tokio::test]
    async fn duplicate_composed_title_dropped() {
        let store = MemoryStore::new().with_partition(
            "p",
            vec![
                RawRecord::new()
                    .with("number", "ABC-001")
                    .with("title", "Foo")
                    .with("magnet", magnet('a')),
                RawRecord::new()
                    .with("number", "ABC-001")
                    .with("title", "Foo")
                    .with("magnet", magnet('b')),
                RawRecord::new()
                    .with("number", "ABC-002")
                    .with("title", "Foo")
                    .with("magnet", magnet('c')),
            ],
        );
        let results = query_partition(&store, "p", &build_fuzzy_predicate("foo"), &normalizer())
            .await
            .expect("query");
        let numbers: Vec<&str> = results.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["ABC-002", "ABC-001"]);
        assert_eq!(results[1].download_url, magnet('b'));
    }

    #[tokio::test]
    async fn records_without_magnet_dropped() {
        let store = MemoryStore::new().with_partition(
            "p",
            vec![
                RawRecord::new().with("number", "ABC-001").with("magnet", "null"),
                RawRecord::new().with("number", "ABC-002"),
            ],
        );
        let results = query_partition(&store, "p", &build_fuzzy_predicate("abc"), &normalizer())
            .await
            .expect("query");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = MemoryStore::new().with_unavailable("p", "timeout");
        let result =
            query_partition(&store, "p", &build_fuzzy_predicate("abc"), &normalizer()).await;
        assert!(result.is_err());
    }
}
