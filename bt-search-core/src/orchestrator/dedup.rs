//! Cross-partition deduplication by canonical magnet link.

use std::collections::HashSet;

use crate::types::CanonicalResult;

/// Keep the first result per non-empty `download_url`.
///
/// Input order is preserved for survivors. Results without a download
/// link are dropped outright rather than deduplicated against each other.
pub fn deduplicate(results: Vec<CanonicalResult>) -> Vec<CanonicalResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| {
            !result.download_url.is_empty() && seen.insert(result.download_url.clone())
        })
        .collect()
}
