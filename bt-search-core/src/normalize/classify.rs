//! Content classification from partition names and title markers.
//!
//! Every flag is an independent OR over partition-name keywords and
//! title markers. Flags never exclude each other.

use std::sync::OnceLock;

use regex::Regex;

/// Partition-name keywords marking subtitled collections.
const CHINESE_PARTITION_KEYWORDS: &[&str] = &["chinese", "domestic"];
/// Partition-name keywords marking uncensored collections.
const UC_PARTITION_KEYWORDS: &[&str] = &["codeless", "domestic", "no_mosaic", "korean", "nomosaic"];
/// Title markers for embedded Chinese subtitles.
const CHINESE_TITLE_MARKERS: &[&str] = &["中字"];
/// Title markers for uncensored, cracked or leaked releases.
const UC_TITLE_MARKERS: &[&str] = &["无码", "破解", "流出"];

/// Classification flags of one result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub chinese: bool,
    pub uc: bool,
    pub uhd: bool,
}

/// `-C` / `_C` code suffix denoting a subtitled variant.
fn subtitle_suffix_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-_]C\b").ok()).as_ref()
}

/// Classify a result by its partition name and composed title.
pub fn classify(partition: &str, title: &str) -> Classification {
    let name = partition.to_lowercase();
    let title_upper = title.to_uppercase();

    let chinese = CHINESE_PARTITION_KEYWORDS.iter().any(|k| name.contains(k))
        || CHINESE_TITLE_MARKERS.iter().any(|m| title.contains(m))
        || subtitle_suffix_pattern().is_some_and(|p| p.is_match(&title_upper));

    let uc = UC_PARTITION_KEYWORDS.iter().any(|k| name.contains(k))
        || UC_TITLE_MARKERS.iter().any(|m| title.contains(m))
        || title_upper.contains("FC2");

    let uhd = name.contains("4k") || title_upper.contains("4K");

    Classification { chinese, uc, uhd }
}
