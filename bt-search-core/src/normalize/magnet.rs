//! Magnet link canonicalisation for deduplication.
//!
//! Reduces a magnet link to its BitTorrent info hash so that links that
//! differ only in trackers, display names or parameter order compare as
//! equal.

use std::sync::OnceLock;

use regex::Regex;

/// Scheme prefix of every canonical magnet link.
pub const MAGNET_PREFIX: &str = "magnet:?xt=urn:btih:";

fn btih_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)urn:btih:([a-z0-9]{32,40})").ok())
        .as_ref()
}

/// Canonicalise a magnet link.
///
/// Extracts the 32–40 character BTIH hash from a `urn:btih:` segment
/// anywhere in `raw` (case-insensitive) and rebuilds the link as
/// `magnet:?xt=urn:btih:<hash>`. The hash keeps its original case.
///
/// Input without a BTIH segment is returned unchanged; empty input stays
/// empty.
///
/// # Examples
///
/// ```
/// use bt_search_core::normalize::magnet::canonicalize_magnet;
///
/// let raw = "magnet:?xt=urn:btih:0123456789ABCDEF0123456789ABCDEF&tr=udp://t.example:80";
/// assert_eq!(
///     canonicalize_magnet(raw),
///     "magnet:?xt=urn:btih:0123456789ABCDEF0123456789ABCDEF"
/// );
/// ```
pub fn canonicalize_magnet(raw: &str) -> String {
    let hash = btih_pattern()
        .and_then(|pattern| pattern.captures(raw))
        .and_then(|caps| caps.get(1));
    match hash {
        Some(hash) => format!("{MAGNET_PREFIX}{}", hash.as_str()),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_32: &str = "AABBCCDDEEFF00112233445566778899";
    const HASH_40: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn strips_trackers_and_display_name() {
        let raw = format!("magnet:?xt=urn:btih:{HASH_40}&dn=Some+Name&tr=udp%3A%2F%2Ft.example%3A80");
        assert_eq!(canonicalize_magnet(&raw), format!("{MAGNET_PREFIX}{HASH_40}"));
    }

    #[test]
    fn finds_hash_when_xt_is_not_first() {
        let raw = format!("magnet:?dn=x&tr=udp://a&xt=urn:btih:{HASH_32}");
        assert_eq!(canonicalize_magnet(&raw), format!("{MAGNET_PREFIX}{HASH_32}"));
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        let raw = format!("MAGNET:?XT=URN:BTIH:{HASH_32}");
        assert_eq!(canonicalize_magnet(&raw), format!("{MAGNET_PREFIX}{HASH_32}"));
    }

    #[test]
    fn equivalent_links_compare_equal() {
        let a = format!("magnet:?xt=urn:btih:{HASH_32}&tr=udp://one");
        let b = format!("magnet:?xt=urn:btih:{HASH_32}&tr=udp://two&dn=other");
        assert_eq!(canonicalize_magnet(&a), canonicalize_magnet(&b));
    }

    #[test]
    fn short_hash_passes_through() {
        let raw = "magnet:?xt=urn:btih:ABC123";
        assert_eq!(canonicalize_magnet(raw), raw);
    }

    #[test]
    fn non_magnet_text_passes_through() {
        assert_eq!(canonicalize_magnet("ed2k://|file|x|"), "ed2k://|file|x|");
        assert_eq!(canonicalize_magnet(""), "");
    }

    #[test]
    fn bare_hash_segment_is_rebuilt() {
        let raw = format!("see urn:btih:{HASH_32} for details");
        assert_eq!(canonicalize_magnet(&raw), format!("{MAGNET_PREFIX}{HASH_32}"));
    }
}
