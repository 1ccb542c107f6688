//! File-backed partition loader.
//!
//! A data directory holds one file per partition, either `<name>.json`
//! (a JSON array of objects) or `<name>.jsonl` (one object per line).
//! File order is insertion order. Everything is read into a
//! [`MemoryStore`] once at startup.

use std::path::{Path, PathBuf};

use bt_search_core::{MemoryStore, RawRecord};

use crate::error::{HostError, Result};

/// Load every partition in `partitions` from `dir`.
///
/// A partition without a file is left empty. A file that cannot be read
/// or parsed marks only that partition unavailable, so searches keep
/// working against the others.
///
/// # Errors
///
/// Returns [`HostError::Store`] if `dir` is not a directory.
pub async fn load_data_dir(dir: &Path, partitions: &[String]) -> Result<MemoryStore> {
    if !tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return Err(HostError::Store(format!(
            "data directory {} does not exist",
            dir.display()
        )));
    }

    let store = MemoryStore::new();
    for partition in partitions {
        let Some(path) = partition_file(dir, partition).await else {
            tracing::warn!(partition = %partition, dir = %dir.display(), "no data file for partition");
            continue;
        };
        match read_partition(&path).await {
            Ok(records) => {
                tracing::info!(partition = %partition, records = records.len(), "loaded partition");
                store.extend(partition, records).await;
            }
            Err(reason) => {
                tracing::error!(partition = %partition, path = %path.display(), error = %reason, "failed to load partition");
                store.mark_unavailable(partition, reason).await;
            }
        }
    }
    Ok(store)
}

async fn partition_file(dir: &Path, partition: &str) -> Option<PathBuf> {
    for extension in ["json", "jsonl"] {
        let candidate = dir.join(format!("{partition}.{extension}"));
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}

async fn read_partition(path: &Path) -> std::result::Result<Vec<RawRecord>, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read failed: {e}"))?;

    if path.extension().is_some_and(|ext| ext == "jsonl") {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str::<RawRecord>(line)
                    .map_err(|e| format!("line {}: {e}", index + 1))
            })
            .collect()
    } else {
        serde_json::from_str::<Vec<RawRecord>>(&content).map_err(|e| format!("parse failed: {e}"))
    }
}
