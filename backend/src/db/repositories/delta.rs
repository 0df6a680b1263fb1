//! On-disk store over the ingestion pipeline's output.
//!
//! Each tier is a directory of parquet part files (the layout the pipeline's
//! Delta tables materialize); the raw tier is a directory of gzipped JSON
//! batches named `{user_id}_{epoch_ms}.gz` (or `.json.gz`), where the epoch
//! milliseconds are UTC and the payload is a JSON array of records.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::db::repository::{RawStore, StoreError, StoreResult, TierStore};
use crate::models::{DateStamp, Tier};

/// Store reading tier tables and raw batches from the filesystem.
pub struct DeltaDirStore {
    tables_dir: PathBuf,
    raw_dir: PathBuf,
}

impl DeltaDirStore {
    /// Create a store rooted at the given table and raw-batch directories.
    pub fn new(tables_dir: impl Into<PathBuf>, raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            tables_dir: tables_dir.into(),
            raw_dir: raw_dir.into(),
        }
    }

    fn tier_dir(&self, tier: Tier) -> PathBuf {
        self.tables_dir.join(tier.table_name())
    }

    /// Read and vertically stack every parquet part file of one tier.
    fn read_tier_blocking(&self, tier: Tier) -> StoreResult<DataFrame> {
        let dir = self.tier_dir(tier);
        if !dir.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "tier table '{}' not found at {}",
                tier.table_name(),
                dir.display()
            )));
        }

        let mut parts: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "parquet"))
            .collect();
        // deterministic stacking order
        parts.sort();

        let mut combined: Option<DataFrame> = None;
        for path in parts {
            let df = read_parquet_part(&path)?;
            combined = Some(match combined {
                Some(mut acc) => {
                    acc.vstack_mut(&df)?;
                    acc
                }
                None => df,
            });
        }
        Ok(combined.unwrap_or_else(DataFrame::empty))
    }

    /// Scan the raw directory for batches whose filename timestamp falls on
    /// `date`, summing JSON record counts per user.
    fn raw_counts_blocking(&self, date: &DateStamp) -> StoreResult<HashMap<String, u64>> {
        if !self.raw_dir.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "raw data directory not found at {}",
                self.raw_dir.display()
            )));
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        for entry in std::fs::read_dir(&self.raw_dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".gz") {
                continue;
            }
            let Some((user_id, batch_date)) = parse_batch_name(name) else {
                log::warn!("skipping raw batch with unparsable name: {}", name);
                continue;
            };
            if batch_date != date.date() {
                continue;
            }
            match count_batch_records(&path) {
                Ok(count) => *counts.entry(user_id.to_string()).or_default() += count,
                Err(e) => log::warn!("skipping unreadable raw batch {}: {}", name, e),
            }
        }
        Ok(counts)
    }
}

/// Split `{user_id}_{epoch_ms}[.json].gz` into the user id and the UTC date
/// encoded by the millisecond timestamp.
fn parse_batch_name(name: &str) -> Option<(&str, chrono::NaiveDate)> {
    let stem = name.strip_suffix(".gz")?;
    let stem = stem.strip_suffix(".json").unwrap_or(stem);
    let (user_id, millis) = stem.split_once('_')?;
    let millis: i64 = millis.parse().ok()?;
    let date = chrono::DateTime::from_timestamp_millis(millis)?.date_naive();
    Some((user_id, date))
}

/// Decode one gzipped batch and count its records: a JSON array counts its
/// elements, any other payload counts as one record.
fn count_batch_records(path: &Path) -> StoreResult<u64> {
    let reader = GzDecoder::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader)
        .map_err(|e| StoreError::Query(format!("invalid JSON in {}: {}", path.display(), e)))?;
    Ok(match value {
        serde_json::Value::Array(records) => records.len() as u64,
        _ => 1,
    })
}

fn read_parquet_part(path: &Path) -> StoreResult<DataFrame> {
    let file = File::open(path)?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| StoreError::Query(format!("failed to read {}: {}", path.display(), e)))?;
    Ok(df)
}

#[async_trait]
impl TierStore for DeltaDirStore {
    async fn read_tier(&self, tier: Tier) -> StoreResult<DataFrame> {
        self.read_tier_blocking(tier)
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.tables_dir.is_dir())
    }
}

#[async_trait]
impl RawStore for DeltaDirStore {
    async fn raw_counts(&self, date: &DateStamp) -> StoreResult<HashMap<String, u64>> {
        self.raw_counts_blocking(date)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_batch_name;

    #[test]
    fn test_parse_batch_name() {
        // 2025-06-05 00:00:00 UTC
        let (user, date) = parse_batch_name("u1_1749081600000.gz").unwrap();
        assert_eq!(user, "u1");
        assert_eq!(date.to_string(), "2025-06-05");

        let (user, _) = parse_batch_name("abc123_1749081600000.json.gz").unwrap();
        assert_eq!(user, "abc123");
    }

    #[test]
    fn test_parse_batch_name_rejects_garbage() {
        assert!(parse_batch_name("nounderscore.gz").is_none());
        assert!(parse_batch_name("user_notmillis.gz").is_none());
        assert!(parse_batch_name("user_123.txt").is_none());
    }
}
