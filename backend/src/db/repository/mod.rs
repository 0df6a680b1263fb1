//! Store traits for abstracting tier and raw-batch access.
//!
//! These traits define the interface the reconciliation engine consumes,
//! allowing different backends (on-disk parquet tables, in-memory mock) to
//! be swapped via dependency injection.

use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::collections::HashMap;

use crate::models::{DateStamp, Tier};

pub mod error;
pub use error::{StoreError, StoreResult};

/// Access to the four tier tables.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can serve
/// concurrent status queries; tiers are read-only, so no locking discipline
/// is required beyond that.
///
/// # Error Handling
/// `read_tier` must signal a distinguishable unavailable condition
/// ([`StoreError::Unavailable`]) rather than panic; callers treat that tier
/// as wholly missing for the current query.
#[async_trait]
pub trait TierStore: Send + Sync {
    /// Read the full contents of one tier as a tabular frame.
    ///
    /// An existing-but-empty table is `Ok` with an empty frame; only a table
    /// that cannot be opened at all is an error.
    async fn read_tier(&self, tier: Tier) -> StoreResult<DataFrame>;

    /// Check whether the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<bool>;
}

/// Access to the raw file-batch tier.
///
/// Raw data arrives as per-user, per-ingestion-timestamp batches; only the
/// record count and the identifying filename metadata matter here, the
/// payload stays opaque.
#[async_trait]
pub trait RawStore: Send + Sync {
    /// Per-user raw record counts for one calendar date (UTC).
    async fn raw_counts(&self, date: &DateStamp) -> StoreResult<HashMap<String, u64>>;
}

/// Combined store interface consumed by the summary engine.
pub trait PipelineStore: TierStore + RawStore {}

impl<T: TierStore + RawStore> PipelineStore for T {}
