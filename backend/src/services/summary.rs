//! Reconciliation summary engine and period rollup.
//!
//! Counts records per tier, classifies every raw-tier user as successfully
//! or unsuccessfully ingested, and derives two pipeline-health flags. The
//! weekly and monthly rollups run the same counting over the period's date
//! list and sum per-user and global counts additively before classifying
//! once for the whole period.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use crate::db::repository::{PipelineStore, RawStore};
use crate::models::{
    DateStamp, Period, PipelineStatus, ReconciliationSummary, Tier,
};

use super::tables::{filter_by_dates, load_tier, primary_identifier_column, string_values};

/// Knobs for a summary computation, passed explicitly so the engine never
/// reads ambient state.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Overrides the computed distinct-raw-user count when set.
    pub total_users: Option<usize>,
    /// Expected silver records per raw record (one per silver sub-tier).
    pub silver_fanout: u64,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            total_users: None,
            silver_fanout: 3,
        }
    }
}

/// Record totals for one tier over a period: a global count plus per-user
/// counts, summed additively across the period's dates.
#[derive(Debug, Default)]
struct TierTally {
    total: u64,
    per_user: HashMap<String, u64>,
}

impl TierTally {
    fn add(&mut self, user_id: String, count: u64) {
        self.total += count;
        *self.per_user.entry(user_id).or_default() += count;
    }

    fn user_count(&self, user_id: &str) -> u64 {
        self.per_user.get(user_id).copied().unwrap_or(0)
    }
}

/// Reconciliation summary for the single date `date`.
pub async fn daily_summary(
    store: &dyn PipelineStore,
    date: DateStamp,
    opts: &SummaryOptions,
) -> ReconciliationSummary {
    summary_for_period(store, Period::single(date), opts).await
}

/// Reconciliation summary for the Monday-start week containing `date`.
pub async fn weekly_summary(
    store: &dyn PipelineStore,
    date: DateStamp,
    opts: &SummaryOptions,
) -> ReconciliationSummary {
    summary_for_period(store, Period::week_of(date), opts).await
}

/// Reconciliation summary for the calendar month containing `date`.
pub async fn monthly_summary(
    store: &dyn PipelineStore,
    date: DateStamp,
    opts: &SummaryOptions,
) -> ReconciliationSummary {
    summary_for_period(store, Period::month_of(date), opts).await
}

/// Run the full reconciliation over an arbitrary period.
pub async fn summary_for_period(
    store: &dyn PipelineStore,
    period: Period,
    opts: &SummaryOptions,
) -> ReconciliationSummary {
    let dates = period.dates();

    let raw = raw_tally(store, dates).await;

    let bronze_frame = load_tier(store, Tier::Bronze).await;
    let bronze = frame_tally(&bronze_frame, dates);

    let mut silver = TierTally::default();
    for tier in Tier::SILVER {
        let frame = load_tier(store, tier).await;
        let tally = frame_tally(&frame, dates);
        silver.total += tally.total;
        for (user_id, count) in tally.per_user {
            *silver.per_user.entry(user_id).or_default() += count;
        }
    }

    // Classification iterates only users seen in the raw tier; a user with
    // zero raw records in the period is excluded entirely.
    let mut users: Vec<String> = raw.per_user.keys().cloned().collect();
    users.sort();

    let fanout = opts.silver_fanout;
    let successful = users
        .iter()
        .filter(|user_id| {
            let raw_count = raw.user_count(user_id);
            let bronze_count = bronze.user_count(user_id);
            let silver_count = silver.user_count(user_id);
            raw_count == bronze_count && bronze_count > 0 && silver_count == raw_count * fanout
        })
        .count();
    let failed = users.len() - successful;

    let raw_to_bronze = raw.total == bronze.total && raw.total > 0;
    let bronze_to_silver = bronze.total * fanout == silver.total && bronze.total > 0;

    ReconciliationSummary {
        date: period.reference().to_string(),
        period_type: period.kind(),
        date_range: period.range_label(),
        date_list: dates.iter().map(|d| d.to_string()).collect(),
        total_users: opts.total_users.unwrap_or(users.len()),
        total_raw: raw.total,
        total_bronze: bronze.total,
        total_silver: silver.total,
        raw_to_bronze_status: PipelineStatus::from_bool(raw_to_bronze),
        bronze_to_silver_status: PipelineStatus::from_bool(bronze_to_silver),
        successful_ingestions: successful,
        failed_ingestions: failed,
        users,
    }
}

/// Per-user raw record counts summed over the period, one raw-store query
/// per date. An unreachable raw store contributes zero counts for that date.
async fn raw_tally(store: &dyn RawStore, dates: &[DateStamp]) -> TierTally {
    let mut tally = TierTally::default();
    for date in dates {
        match store.raw_counts(date).await {
            Ok(counts) => {
                for (user_id, count) in counts {
                    tally.add(user_id, count);
                }
            }
            Err(e) => log::warn!("raw store unavailable for {}: {}", date, e),
        }
    }
    tally
}

/// Row counts for a tier frame restricted to the period, grouped on the
/// tier's primary identifier column.
fn frame_tally(df: &DataFrame, dates: &[DateStamp]) -> TierTally {
    let filtered = filter_by_dates(df, dates);
    let mut tally = TierTally {
        total: filtered.height() as u64,
        per_user: HashMap::new(),
    };

    let Some(id_column) = primary_identifier_column(&filtered) else {
        if tally.total > 0 {
            log::warn!("tier rows have no identifier column, per-user counts unavailable");
        }
        return tally;
    };
    match string_values(&filtered, &id_column) {
        Ok(ids) => {
            for user_id in ids.into_iter().flatten() {
                *tally.per_user.entry(user_id).or_default() += 1;
            }
        }
        Err(e) => log::warn!("identifier column '{}' could not be decoded: {}", id_column, e),
    }
    tally
}
