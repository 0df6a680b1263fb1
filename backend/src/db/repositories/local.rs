//! In-memory local store implementation.
//!
//! Stores each tier as a plain `DataFrame` and raw counts as nested maps,
//! giving fast, deterministic, isolated execution for unit tests and local
//! development. Individual tiers and the raw directory can be flagged
//! unavailable to exercise the degraded paths.

use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::db::repository::{RawStore, StoreError, StoreResult, TierStore};
use crate::models::{DateStamp, Tier};

/// In-memory local store.
///
/// # Example
/// ```ignore
/// let store = LocalStore::new();
/// store.set_tier(Tier::Bronze, df!("user_id" => ["u1"], "ingestion_date" => ["2025-06-05"])?);
/// store.add_raw_records(&DateStamp::parse("2025-06-05")?, "u1", 2);
/// ```
#[derive(Clone, Default)]
pub struct LocalStore {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    tiers: HashMap<Tier, DataFrame>,
    // date string -> user id -> record count
    raw: HashMap<String, HashMap<String, u64>>,
    unavailable_tiers: HashSet<Tier>,
    raw_unavailable: bool,
    is_healthy: bool,
}

impl LocalStore {
    /// Create a new empty local store.
    pub fn new() -> Self {
        let store = Self::default();
        store.data.write().unwrap().is_healthy = true;
        store
    }

    /// Replace the contents of one tier table.
    pub fn set_tier(&self, tier: Tier, df: DataFrame) {
        self.data.write().unwrap().tiers.insert(tier, df);
    }

    /// Add raw records for a user on a date, accumulating across calls.
    pub fn add_raw_records(&self, date: &DateStamp, user_id: &str, count: u64) {
        let mut data = self.data.write().unwrap();
        *data
            .raw
            .entry(date.to_string())
            .or_default()
            .entry(user_id.to_string())
            .or_default() += count;
    }

    /// Flag one tier as unreadable to simulate a storage failure.
    pub fn set_tier_unavailable(&self, tier: Tier, unavailable: bool) {
        let mut data = self.data.write().unwrap();
        if unavailable {
            data.unavailable_tiers.insert(tier);
        } else {
            data.unavailable_tiers.remove(&tier);
        }
    }

    /// Flag the raw directory as unreadable.
    pub fn set_raw_unavailable(&self, unavailable: bool) {
        self.data.write().unwrap().raw_unavailable = unavailable;
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Clear all data, keeping health flags.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.tiers.clear();
        data.raw.clear();
    }
}

#[async_trait]
impl TierStore for LocalStore {
    async fn read_tier(&self, tier: Tier) -> StoreResult<DataFrame> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(StoreError::Unavailable("store is not healthy".to_string()));
        }
        if data.unavailable_tiers.contains(&tier) {
            return Err(StoreError::Unavailable(format!(
                "tier '{}' is unavailable",
                tier.table_name()
            )));
        }
        Ok(data
            .tiers
            .get(&tier)
            .cloned()
            .unwrap_or_else(DataFrame::empty))
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }
}

#[async_trait]
impl RawStore for LocalStore {
    async fn raw_counts(&self, date: &DateStamp) -> StoreResult<HashMap<String, u64>> {
        let data = self.data.read().unwrap();
        if !data.is_healthy || data.raw_unavailable {
            return Err(StoreError::Unavailable(
                "raw store is unavailable".to_string(),
            ));
        }
        Ok(data.raw.get(&date.to_string()).cloned().unwrap_or_default())
    }
}
