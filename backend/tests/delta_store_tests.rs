//! Tests for the on-disk store: parquet tier directories plus the gzipped
//! raw batch directory, laid out the way the ingestion pipeline writes them.

#![cfg(feature = "delta-repo")]

use std::fs::{self, File};
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use polars::prelude::*;
use tempfile::TempDir;

use etlmon_rust::db::{DeltaDirStore, RawStore, StoreError, TierStore};
use etlmon_rust::models::{DateStamp, Tier};

fn date(s: &str) -> DateStamp {
    DateStamp::parse(s).unwrap()
}

/// Writes `df` as a single parquet part file under the tier's directory.
fn write_tier_part(root: &TempDir, tier: Tier, part: &str, df: &mut DataFrame) {
    let dir = root.path().join(tier.table_name());
    fs::create_dir_all(&dir).unwrap();
    let file = File::create(dir.join(part)).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();
}

/// Writes a gzipped JSON-array batch named `{user}_{epoch_ms}.gz`.
fn write_raw_batch(root: &TempDir, name: &str, records: usize) {
    let body: Vec<serde_json::Value> = (0..records)
        .map(|i| serde_json::json!({ "seq": i }))
        .collect();
    let file = File::create(root.path().join(name)).unwrap();
    let mut gz = GzEncoder::new(file, Compression::default());
    gz.write_all(serde_json::to_string(&body).unwrap().as_bytes())
        .unwrap();
    gz.finish().unwrap();
}

// =========================================================
// Tier reads
// =========================================================

#[tokio::test]
async fn test_reads_and_stacks_parquet_parts() {
    let tables = TempDir::new().unwrap();
    let raw = TempDir::new().unwrap();

    let mut part_a = df!(
        "user_id" => ["u1"],
        "ingestion_date" => ["2025-06-05"],
    )
    .unwrap();
    let mut part_b = df!(
        "user_id" => ["u2", "u3"],
        "ingestion_date" => ["2025-06-05", "2025-06-06"],
    )
    .unwrap();
    write_tier_part(&tables, Tier::Bronze, "part-000.parquet", &mut part_a);
    write_tier_part(&tables, Tier::Bronze, "part-001.parquet", &mut part_b);

    let store = DeltaDirStore::new(tables.path(), raw.path());
    let df = store.read_tier(Tier::Bronze).await.unwrap();
    assert_eq!(df.height(), 3);
    assert!(df.column("user_id").is_ok());
}

#[tokio::test]
async fn test_missing_tier_directory_is_unavailable() {
    let tables = TempDir::new().unwrap();
    let raw = TempDir::new().unwrap();

    let store = DeltaDirStore::new(tables.path(), raw.path());
    let err = store.read_tier(Tier::SilverRrBucket).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[tokio::test]
async fn test_health_check_requires_tables_dir() {
    let tables = TempDir::new().unwrap();
    let raw = TempDir::new().unwrap();

    let store = DeltaDirStore::new(tables.path(), raw.path());
    assert!(store.health_check().await.unwrap());

    let gone = DeltaDirStore::new(tables.path().join("nope"), raw.path());
    assert!(!gone.health_check().await.unwrap());
}

// =========================================================
// Raw batch counting
// =========================================================

#[tokio::test]
async fn test_raw_counts_by_user_and_date() {
    let tables = TempDir::new().unwrap();
    let raw = TempDir::new().unwrap();

    // 2025-06-05T00:00:00Z and +1h, one batch on the following day
    write_raw_batch(&raw, "u1_1749081600000.gz", 3);
    write_raw_batch(&raw, "u1_1749085200000.gz", 2);
    write_raw_batch(&raw, "u2_1749081600000.gz", 1);
    write_raw_batch(&raw, "u1_1749168000000.gz", 4);

    let store = DeltaDirStore::new(tables.path(), raw.path());
    let counts = store.raw_counts(&date("2025-06-05")).await.unwrap();

    assert_eq!(counts.get("u1"), Some(&5));
    assert_eq!(counts.get("u2"), Some(&1));
    assert_eq!(counts.len(), 2);

    let next_day = store.raw_counts(&date("2025-06-06")).await.unwrap();
    assert_eq!(next_day.get("u1"), Some(&4));
}

#[tokio::test]
async fn test_unparsable_batch_names_are_skipped() {
    let tables = TempDir::new().unwrap();
    let raw = TempDir::new().unwrap();

    write_raw_batch(&raw, "u1_1749081600000.gz", 2);
    fs::write(raw.path().join("notes.txt"), b"not a batch").unwrap();
    fs::write(raw.path().join("u9_garbage.gz"), b"bad name").unwrap();

    let store = DeltaDirStore::new(tables.path(), raw.path());
    let counts = store.raw_counts(&date("2025-06-05")).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.get("u1"), Some(&2));
}

#[tokio::test]
async fn test_missing_raw_directory_is_unavailable() {
    let tables = TempDir::new().unwrap();

    let store = DeltaDirStore::new(tables.path(), tables.path().join("nope"));
    let err = store.raw_counts(&date("2025-06-05")).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
