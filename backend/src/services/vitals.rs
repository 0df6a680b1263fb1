//! Per-user x per-vital-signal coverage in the bronze tier.

use std::collections::{BTreeSet, HashMap, HashSet};

use polars::prelude::DataFrame;

use crate::db::repository::TierStore;
use crate::models::{Availability, DateStamp, StatusRow, StatusTable, Tier};

use super::tables::{filter_by_date, identifier_columns, string_values};
use super::users::discover_users;

/// Signals reported when the bronze tier cannot tell us which ones exist.
pub const DEFAULT_VITAL_SIGNALS: [&str; 5] = [
    "STEPS",
    "HEART_RATE",
    "HEART_RATE_VARIABILITY_SDNN",
    "BLOOD_OXYGEN",
    "RESPIRATORY_RATE",
];

/// Column in the bronze tier naming the signal a record belongs to.
const SIGNAL_COLUMN: &str = "type";

/// Build the vitals-coverage grid for one date.
///
/// The signal set is discovered from the distinct non-empty values of the
/// bronze `type` column (sorted); when bronze is unreadable or exposes no
/// signals, the fixed default set is used so the dashboard keeps its shape.
/// A cell is `Available` iff the user has at least one bronze row on `date`
/// with that signal type.
pub async fn vitals_coverage(store: &dyn TierStore, date: &DateStamp) -> StatusTable {
    let users = discover_users(store).await;

    let bronze = match store.read_tier(Tier::Bronze).await {
        Ok(df) => Some(df),
        Err(e) => {
            log::warn!("bronze tier unavailable, using default signal set: {}", e);
            None
        }
    };

    let signals = match &bronze {
        Some(df) => discover_signals(df),
        None => Vec::new(),
    };
    let signals = if signals.is_empty() {
        DEFAULT_VITAL_SIGNALS
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        signals
    };

    let signals_per_user = match &bronze {
        Some(df) => user_signals_on_date(df, date),
        None => HashMap::new(),
    };

    let mut columns = vec!["user_id".to_string()];
    columns.extend(signals.iter().cloned());

    let rows = users
        .into_iter()
        .map(|user_id| {
            let user_signals = signals_per_user.get(&user_id);
            let cells = signals
                .iter()
                .map(|signal| {
                    let present = user_signals.is_some_and(|set| set.contains(signal));
                    (signal.clone(), Availability::from_bool(present))
                })
                .collect();
            StatusRow { user_id, cells }
        })
        .collect();

    StatusTable { columns, rows }
}

/// Distinct non-empty signal names in the bronze `type` column, sorted.
fn discover_signals(bronze: &DataFrame) -> Vec<String> {
    let Ok(values) = string_values(bronze, SIGNAL_COLUMN) else {
        return Vec::new();
    };
    let signals: BTreeSet<String> = values
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    signals.into_iter().collect()
}

/// Map each user to the set of signal types they have bronze rows for on
/// `date`, pairing every identifier column with the `type` column rowwise.
fn user_signals_on_date(bronze: &DataFrame, date: &DateStamp) -> HashMap<String, HashSet<String>> {
    let filtered = filter_by_date(bronze, date);
    let Ok(types) = string_values(&filtered, SIGNAL_COLUMN) else {
        return HashMap::new();
    };

    let mut per_user: HashMap<String, HashSet<String>> = HashMap::new();
    for column in identifier_columns(&filtered) {
        let Ok(ids) = string_values(&filtered, &column) else {
            continue;
        };
        for (id, signal) in ids.into_iter().zip(types.iter()) {
            if let (Some(id), Some(signal)) = (id, signal) {
                per_user.entry(id).or_default().insert(signal.clone());
            }
        }
    }
    per_user
}
