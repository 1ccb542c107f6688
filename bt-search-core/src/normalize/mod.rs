//! Record normalisation: raw partition documents into [`CanonicalResult`].
//!
//! Resolves aliased fields, composes the display title, canonicalises the
//! magnet link, resolves the size and derives classification flags.

pub mod classify;
pub mod fields;
pub mod magnet;
pub mod size;

use crate::config::EngineSettings;
use crate::types::{CanonicalResult, RawRecord, PLACEHOLDER_SEEDERS};

use classify::classify;
use fields::{extract_numeric_id, first_present, MAGNET_KEYS, NUMBER_KEYS, TITLE_KEYS};
use magnet::canonicalize_magnet;
use size::resolve_size_mb;

/// Title used when a record has neither a code nor a title.
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// Compose the display title from a product code and a free-text title.
///
/// Inputs are expected to be cleaned already (empty means missing).
///
/// - a title lacking `brand` gets it prepended
/// - a code already contained in the title leaves the title unchanged,
///   otherwise the code is prepended
/// - a lone code or a lone title is returned as-is
/// - [`PLACEHOLDER_TITLE`] when both are missing
///
/// # Examples
///
/// ```
/// use bt_search_core::normalize::compose_title;
///
/// assert_eq!(compose_title("ABC-123", "[S] Foo", "[S]"), "ABC-123 [S] Foo");
/// assert_eq!(compose_title("", "", "[S]"), "No Title");
/// ```
pub fn compose_title(number: &str, title: &str, brand: &str) -> String {
    let title = if !title.is_empty() && !brand.is_empty() && !title.contains(brand) {
        format!("{brand} {title}")
    } else {
        title.to_owned()
    };
    match (number.is_empty(), title.is_empty()) {
        (false, false) if title.contains(number) => title,
        (false, false) => format!("{number} {title}"),
        (false, true) => number.to_owned(),
        (true, false) => title,
        (true, true) => PLACEHOLDER_TITLE.to_owned(),
    }
}

/// Maps raw records of any partition schema onto [`CanonicalResult`].
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    brand_label: String,
    site_name: String,
}

impl RecordNormalizer {
    pub fn new(brand_label: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            brand_label: brand_label.into(),
            site_name: site_name.into(),
        }
    }

    /// Build a normaliser from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.brand_label.clone(), settings.site_name.clone())
    }

    /// Normalise one record read from `partition`.
    ///
    /// Never fails: unparseable fields fall back to their defaults.
    pub fn normalize(&self, record: &RawRecord, partition: &str) -> CanonicalResult {
        let number = first_present(record, NUMBER_KEYS);
        let raw_title = first_present(record, TITLE_KEYS);
        let title = compose_title(&number, &raw_title, &self.brand_label);
        let download_url = canonicalize_magnet(&first_present(record, MAGNET_KEYS));
        let size_mb = resolve_size_mb(record, &title);
        let flags = classify(partition, &title);

        CanonicalResult {
            id: extract_numeric_id(record),
            site: self.site_name.clone(),
            partition: partition.to_owned(),
            size_mb,
            seeders: PLACEHOLDER_SEEDERS,
            title,
            number,
            chinese: flags.chinese,
            uc: flags.uc,
            uhd: flags.uhd,
            free: true,
            download_url,
        }
    }
}
