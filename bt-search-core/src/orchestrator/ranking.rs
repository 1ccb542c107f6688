//! Final ordering of deduplicated results.
//!
//! Three keys, applied with a stable sort:
//!
//! 1. results whose code contains the keyword (case-insensitive) first
//! 2. results with an empty code last
//! 3. ascending case-insensitive code
//!
//! Ties keep their merge order.

use crate::types::CanonicalResult;

/// Sort key of one result. `keyword_lower` must already be lowercased.
fn sort_key(result: &CanonicalResult, keyword_lower: &str) -> (bool, bool, String) {
    let number = result.number.to_lowercase();
    (
        !number.contains(keyword_lower),
        result.number.is_empty(),
        number,
    )
}

/// Sort `results` in place for `keyword`. The sort is stable.
pub fn rank_results(results: &mut [CanonicalResult], keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    results.sort_by_cached_key(|r| sort_key(r, &keyword_lower));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(number: &str, partition: &str) -> CanonicalResult {
        CanonicalResult {
            id: 0,
            site: "Site".into(),
            partition: partition.into(),
            size_mb: 0.0,
            seeders: 999,
            title: "t".into(),
            number: number.into(),
            chinese: false,
            uc: false,
            uhd: false,
            free: true,
            download_url: format!("magnet:?xt=urn:btih:{number}{partition}"),
        }
    }

    fn numbers(results: &[CanonicalResult]) -> Vec<&str> {
        results.iter().map(|r| r.number.as_str()).collect()
    }

    #[test]
    fn keyword_matches_sort_first() {
        let mut results = vec![
            make_result("AAA-001", "p"),
            make_result("abc-200", "p"),
            make_result("ABC-100", "p"),
        ];
        rank_results(&mut results, "ABC");
        assert_eq!(numbers(&results), vec!["ABC-100", "abc-200", "AAA-001"]);
    }

    #[test]
    fn empty_numbers_sort_last() {
        let mut results = vec![
            make_result("", "p"),
            make_result("ZZZ-001", "p"),
            make_result("ABC-001", "p"),
        ];
        rank_results(&mut results, "foo");
        assert_eq!(numbers(&results), vec!["ABC-001", "ZZZ-001", ""]);
    }

    #[test]
    fn empty_keyword_matches_every_number() {
        let mut results = vec![make_result("", "p"), make_result("B-1", "p"), make_result("a-1", "p")];
        rank_results(&mut results, "");
        assert_eq!(numbers(&results), vec!["a-1", "B-1", ""]);
    }

    #[test]
    fn ties_keep_merge_order() {
        let mut results = vec![
            make_result("ABC-001", "first"),
            make_result("abc-001", "second"),
            make_result("ABC-001", "third"),
        ];
        rank_results(&mut results, "abc-001");
        let partitions: Vec<&str> = results.iter().map(|r| r.partition.as_str()).collect();
        assert_eq!(partitions, vec!["first", "second", "third"]);
    }
}
