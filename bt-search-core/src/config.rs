//! Engine settings with the defaults of the deployed collection set.
//!
//! [`EngineSettings`] is passed into [`crate::SearchOrchestrator`] once at
//! construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Collections searched when no explicit list is configured.
pub const DEFAULT_PARTITIONS: &[&str] = &[
    "4k_video",
    "anime_originate",
    "asia_codeless_originate",
    "asia_mosaic_originate",
    "domestic_original",
    "hd_chinese_subtitles",
    "three_levels_photo",
    "vegan_with_mosaic",
];

/// Brand label prepended to composed titles.
pub const DEFAULT_BRAND_LABEL: &str = "[色花堂]";

/// Site label attached to every result.
pub const DEFAULT_SITE_NAME: &str = "Sehuatang";

/// Immutable configuration for one search engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Ordered partition (collection) names. Batches follow this order.
    pub partitions: Vec<String>,
    /// Number of partitions queried concurrently. Values below 1 are
    /// treated as 1 by the scheduler.
    pub batch_size: usize,
    /// Brand label that composed titles must carry.
    pub brand_label: String,
    /// Site label copied onto every result.
    pub site_name: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS.iter().map(|s| (*s).to_owned()).collect(),
            batch_size: 4,
            brand_label: DEFAULT_BRAND_LABEL.to_owned(),
            site_name: DEFAULT_SITE_NAME.to_owned(),
        }
    }
}

impl EngineSettings {
    /// Validates these settings, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `batch_size` must be greater than 0
    /// - partition names must not be blank
    ///
    /// An empty partition list is valid: searches simply return nothing.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.batch_size == 0 {
            return Err(SearchError::Config(
                "batch_size must be greater than 0".into(),
            ));
        }
        if self.partitions.iter().any(|p| p.trim().is_empty()) {
            return Err(SearchError::Config(
                "partition names must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Batch size actually used by the scheduler.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_deployed_values() {
        let settings = EngineSettings::default();
        assert_eq!(settings.partitions.len(), 8);
        assert_eq!(settings.partitions[0], "4k_video");
        assert_eq!(settings.batch_size, 4);
        assert_eq!(settings.brand_label, "[色花堂]");
        assert_eq!(settings.site_name, "Sehuatang");
    }

    #[test]
    fn valid_settings_pass_validation() {
        assert!(EngineSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_batch_size_rejected() {
        let settings = EngineSettings {
            batch_size: 0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn blank_partition_rejected() {
        let settings = EngineSettings {
            partitions: vec!["4k_video".into(), "  ".into()],
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("partition"));
    }

    #[test]
    fn empty_partition_list_is_valid() {
        let settings = EngineSettings {
            partitions: vec![],
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn effective_batch_size_clamps_to_one() {
        let settings = EngineSettings {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(settings.effective_batch_size(), 1);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"batch_size": 2}"#).expect("deserialize");
        assert_eq!(settings.batch_size, 2);
        assert_eq!(settings.partitions.len(), 8);
    }
}
