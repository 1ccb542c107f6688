//! Size resolution in MiB from numeric fields or free text.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::fields::SIZE_KEYS;
use crate::types::RawRecord;

fn size_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?i)([0-9０-９]+(?:[.．][0-9０-９]+)?)\s*(GiB|MiB|KiB|GB|MB|KB)").ok()
        })
        .as_ref()
}

/// Parse the first `<number><unit>` occurrence in `text` and convert to MiB.
///
/// Units are GB/MB/KB and their GiB/MiB/KiB synonyms, case-insensitive;
/// both families use binary multiples. Digits may be ASCII or full-width
/// (`１.５GB`); digits from other scripts are not recognised. Returns 0
/// when nothing matches.
///
/// # Examples
///
/// ```
/// use bt_search_core::normalize::size::size_from_text;
///
/// assert_eq!(size_from_text("ABC-123 1.5GB"), 1536.0);
/// assert_eq!(size_from_text("no size here"), 0.0);
/// ```
pub fn size_from_text(text: &str) -> f64 {
    let Some(caps) = size_pattern().and_then(|pattern| pattern.captures(text)) else {
        return 0.0;
    };
    let Some(value) = caps
        .get(1)
        .and_then(|m| fold_full_width(m.as_str()).parse::<f64>().ok())
    else {
        return 0.0;
    };
    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_ascii_uppercase())
        .unwrap_or_default();
    if unit.starts_with('G') {
        value * 1024.0
    } else if unit.starts_with('M') {
        value
    } else if unit.starts_with('K') {
        value / 1024.0
    } else {
        0.0
    }
}

/// Resolve a record's size in MiB, rounded to two decimals.
///
/// The first size alias holding a number (or numeric string) wins;
/// otherwise the unit-bearing size inside `title` is used. A size field
/// with units such as `"4.2 GB"` is not numeric and is skipped.
///
/// Negative and non-finite values are ignored. Falls back to 0.
pub fn resolve_size_mb(record: &RawRecord, title: &str) -> f64 {
    let size = SIZE_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(numeric_size)
        .unwrap_or_else(|| size_from_text(title));
    round2(size)
}

/// Offset between the full-width forms block and printable ASCII.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Map full-width digits and dot to ASCII.
fn fold_full_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' | '．' => char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c),
            other => other,
        })
        .collect()
}

fn numeric_size(value: &Value) -> Option<f64> {
    let size = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (size.is_finite() && size >= 0.0).then_some(size)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
