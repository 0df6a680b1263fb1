//! Derived status values and summary DTOs returned to the dashboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::PeriodType;

/// Whether a (user, tier/signal, date) cell has at least one matching record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Missing,
}

impl Availability {
    pub fn from_bool(present: bool) -> Self {
        if present {
            Availability::Available
        } else {
            Availability::Missing
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => f.write_str("Available"),
            Availability::Missing => f.write_str("Missing"),
        }
    }
}

/// Outcome of a pipeline-stage consistency check over aggregate totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStatus {
    Success,
    Failed,
}

impl PipelineStatus {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            PipelineStatus::Success
        } else {
            PipelineStatus::Failed
        }
    }
}

/// One row of a status grid: a user id plus one availability cell per column.
///
/// Cells are keyed by the tier table name (sync status) or signal name
/// (vitals coverage); `StatusTable::columns` carries the presentation order
/// and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub user_id: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, Availability>,
}

/// A per-user availability grid for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    /// Column labels, `user_id` first.
    pub columns: Vec<String>,
    pub rows: Vec<StatusRow>,
}

/// Aggregate reconciliation of record counts across the storage tiers,
/// computed fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Reference date of the query.
    pub date: String,
    pub period_type: PeriodType,
    /// `first to last` for rollups, the date itself for daily.
    pub date_range: String,
    /// Every date the counts were aggregated over.
    pub date_list: Vec<String>,
    /// Distinct users seen in the raw tier, unless overridden by settings.
    pub total_users: usize,
    pub total_raw: u64,
    pub total_bronze: u64,
    pub total_silver: u64,
    pub raw_to_bronze_status: PipelineStatus,
    pub bronze_to_silver_status: PipelineStatus,
    /// Users whose counts satisfy the fan-out rule across all tiers.
    pub successful_ingestions: usize,
    pub failed_ingestions: usize,
    /// Sorted ids of every user seen in the raw tier over the period.
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_serializes_as_label() {
        let json = serde_json::to_string(&Availability::Available).unwrap();
        assert_eq!(json, "\"Available\"");
        let json = serde_json::to_string(&Availability::Missing).unwrap();
        assert_eq!(json, "\"Missing\"");
    }

    #[test]
    fn test_status_row_flattens_cells() {
        let mut cells = BTreeMap::new();
        cells.insert("bronze".to_string(), Availability::Available);
        let row = StatusRow {
            user_id: "u1".to_string(),
            cells,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["bronze"], "Available");
    }

    #[test]
    fn test_period_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PeriodType::Weekly).unwrap(),
            "\"weekly\""
        );
    }
}
