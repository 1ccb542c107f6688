//! # bt-search-core
//!
//! Keyword search across many independently-schemaed torrent collections.
//!
//! Every search fans out to the configured partitions of a
//! [`DocumentStore`], normalises heterogeneous records into one
//! [`CanonicalResult`] shape, deduplicates them by magnet info hash and
//! returns a deterministically ordered list.
//!
//! ## Design
//!
//! - Code-like keywords (`ABC-123`, `SSIS`) first run a strict prefix query
//!   on the code field; an empty strict result falls back to a fuzzy
//!   substring query over title and code
//! - Partitions are queried in fixed-size batches: batches run one after
//!   another, partitions inside a batch run concurrently
//! - Graceful degradation: a failing partition is logged and contributes
//!   nothing, the rest of the search proceeds
//! - No pagination: the full deduplicated set is returned for any page

pub mod config;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod query;
pub mod store;
pub mod types;

pub use config::EngineSettings;
pub use error::{Result, SearchError};
pub use orchestrator::search::SearchOrchestrator;
pub use store::{DocumentStore, MemoryStore};
pub use types::{CanonicalResult, RawRecord, SearchResponse};

/// Search every partition in `settings` for `keyword`.
///
/// Convenience wrapper around [`SearchOrchestrator::search`] for one-off
/// calls; long-lived callers should keep an orchestrator instead.
///
/// # Examples
///
/// ```
/// # async fn example() {
/// use bt_search_core::{EngineSettings, MemoryStore, RawRecord};
///
/// let store = MemoryStore::new().with_partition(
///     "4k_video",
///     vec![RawRecord::new()
///         .with("number", "ABC-123")
///         .with("title", "Foo")
///         .with("magnet", "magnet:?xt=urn:btih:AABBCCDDEEFF00112233445566778899&tr=x")],
/// );
/// let settings = EngineSettings {
///     partitions: vec!["4k_video".into()],
///     ..Default::default()
/// };
/// let response = bt_search_core::search("ABC-123", 1, &settings, &store).await;
/// assert_eq!(response.total, 1);
/// assert_eq!(response.data[0].title, "ABC-123 [色花堂] Foo");
/// # }
/// ```
pub async fn search<S: DocumentStore>(
    keyword: &str,
    page: u32,
    settings: &EngineSettings,
    store: &S,
) -> SearchResponse {
    SearchOrchestrator::new(settings.clone(), store)
        .search(keyword, page)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_with_empty_store_returns_empty() {
        let store = MemoryStore::new();
        let response = search("ABC-123", 1, &EngineSettings::default(), &store).await;
        assert_eq!(response.total, 0);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn search_tolerates_zero_batch_size() {
        let store = MemoryStore::new().with_partition(
            "p",
            vec![RawRecord::new()
                .with("number", "ABC-1")
                .with("magnet", "magnet:?xt=urn:btih:AABBCCDDEEFF00112233445566778899")],
        );
        let settings = EngineSettings {
            partitions: vec!["p".into()],
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(search("abc", 1, &settings, &store).await.total, 1);
    }
}
