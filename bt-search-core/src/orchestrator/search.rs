//! Two-phase search: strict code prefix first, fuzzy substring fallback.
//!
//! ```text
//! Start ──(blank keyword | no partitions)──────────────▶ Done (empty)
//!   │
//!   ├──(code-like keyword)──▶ StrictAttempt ──(≥1 hit)──▶ Done
//!   │                              │
//!   │                          (no hits)
//!   │                              ▼
//!   └────────────────────────▶ FallbackFuzzy ───────────▶ Done
//! ```

use crate::config::EngineSettings;
use crate::normalize::RecordNormalizer;
use crate::query::{
    build_fuzzy_predicate, build_strict_predicate, is_strict_code_candidate, Predicate,
};
use crate::store::DocumentStore;
use crate::types::{CanonicalResult, SearchResponse};

use super::batch::run_batches;
use super::dedup::deduplicate;
use super::ranking::rank_results;

/// Runs keyword searches across every configured partition of a store.
///
/// Holds the immutable settings and the store handle for its whole life;
/// each [`SearchOrchestrator::search`] call is independent.
#[derive(Debug)]
pub struct SearchOrchestrator<S> {
    settings: EngineSettings,
    normalizer: RecordNormalizer,
    store: S,
}

impl<S: DocumentStore> SearchOrchestrator<S> {
    pub fn new(settings: EngineSettings, store: S) -> Self {
        let normalizer = RecordNormalizer::from_settings(&settings);
        Self {
            settings,
            normalizer,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search every partition for `keyword`.
    ///
    /// `page` is accepted for compatibility only: the full deduplicated,
    /// sorted result set is always returned.
    ///
    /// # Pipeline
    ///
    /// 1. Reject a blank keyword or an empty partition list with an empty
    ///    response, without touching the store
    /// 2. If the keyword looks like a code, run the strict prefix query;
    ///    return its results if there are any
    /// 3. Otherwise run the fuzzy substring query and return its results
    ///
    /// Never fails: partition errors are logged and skipped.
    pub async fn search(&self, keyword: &str, page: u32) -> SearchResponse {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            tracing::warn!("empty keyword received, returning empty result");
            return SearchResponse::empty();
        }
        if self.settings.partitions.is_empty() {
            tracing::warn!("no partitions configured, returning empty result");
            return SearchResponse::empty();
        }

        if is_strict_code_candidate(keyword) {
            let strict = self
                .execute(keyword, page, &build_strict_predicate(keyword))
                .await;
            if !strict.is_empty() {
                tracing::info!(total = strict.len(), "returning strict code matches");
                return SearchResponse::from(strict);
            }
            tracing::info!(keyword, "no strict code matches, falling back to fuzzy search");
        }

        let fuzzy = self
            .execute(keyword, page, &build_fuzzy_predicate(keyword))
            .await;
        tracing::info!(total = fuzzy.len(), "returning fuzzy matches");
        SearchResponse::from(fuzzy)
    }

    /// Run one predicate over all partitions, then dedup and rank.
    async fn execute(&self, keyword: &str, page: u32, predicate: &Predicate) -> Vec<CanonicalResult> {
        tracing::info!(
            mode = %predicate.mode,
            keyword,
            page,
            partitions = self.settings.partitions.len(),
            "search phase start"
        );

        let outcome = run_batches(
            &self.store,
            &self.settings.partitions,
            self.settings.effective_batch_size(),
            predicate,
            &self.normalizer,
        )
        .await;

        if !outcome.failed_partitions.is_empty() {
            tracing::warn!(
                failed = ?outcome.failed_partitions,
                "some partitions failed and were skipped"
            );
        }

        let merged = outcome.results.len();
        let mut results = deduplicate(outcome.results);
        rank_results(&mut results, keyword);
        tracing::debug!(merged, unique = results.len(), "global dedup complete");
        results
    }
}
