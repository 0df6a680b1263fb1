//! Tiered table access: tolerant loads, schema discovery, date filtering.
//!
//! Tier schemas are heterogeneous; the engine never special-cases a tier's
//! shape beyond resolving two things from its typed column list: which
//! columns carry user identifiers and which column carries the record date.

use polars::prelude::*;
use std::collections::HashSet;

use crate::db::repository::TierStore;
use crate::models::{DateStamp, Tier};

/// Date column names tried in fixed preference order. The first one present
/// in the schema wins; multiple date columns are never merged.
pub const DATE_COLUMNS: [&str; 4] = ["ingestion_date", "ingestion_timestamp", "date", "timestamp"];

/// Load the full contents of a tier, degrading an unreadable table to an
/// empty frame so one failed tier never aborts a status query.
pub async fn load_tier(store: &dyn TierStore, tier: Tier) -> DataFrame {
    match store.read_tier(tier).await {
        Ok(df) => df,
        Err(e) => {
            log::warn!("tier '{}' unavailable, treating as empty: {}", tier, e);
            DataFrame::empty()
        }
    }
}

/// Column names of a frame as owned strings.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Every column whose name contains `user_id`, case-insensitively.
pub fn identifier_columns(df: &DataFrame) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|name| name.to_lowercase().contains("user_id"))
        .collect()
}

/// The identifier column used for per-user grouping: an exact `user_id`
/// column when present, otherwise the first identifier-like column.
pub fn primary_identifier_column(df: &DataFrame) -> Option<String> {
    let candidates = identifier_columns(df);
    candidates
        .iter()
        .find(|name| name.as_str() == "user_id")
        .cloned()
        .or_else(|| candidates.into_iter().next())
}

/// The date column this frame will be filtered on, if any.
pub fn resolve_date_column(df: &DataFrame) -> Option<String> {
    let names = column_names(df);
    DATE_COLUMNS
        .iter()
        .find(|candidate| names.iter().any(|n| n == *candidate))
        .map(|c| c.to_string())
}

/// Read one column as stringly values, casting whatever the storage dtype is.
pub fn string_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Restrict a frame to rows on a single date.
pub fn filter_by_date(df: &DataFrame, date: &DateStamp) -> DataFrame {
    filter_by_dates(df, std::slice::from_ref(date))
}

/// Restrict a frame to rows whose date falls in `dates`.
///
/// The date column is resolved by [`resolve_date_column`]; timestamp-named
/// columns have each value truncated at the first space before comparison
/// against the literal `YYYY-MM-DD` strings. A frame without a usable date
/// column filters to empty (logged, not fatal).
pub fn filter_by_dates(df: &DataFrame, dates: &[DateStamp]) -> DataFrame {
    if df.height() == 0 {
        return df.clone();
    }

    let Some(date_col) = resolve_date_column(df) else {
        log::warn!(
            "no recognized date column among {:?}, treating table as empty for this query",
            column_names(df)
        );
        return DataFrame::empty();
    };

    let truncate = date_col.contains("timestamp");
    let wanted: HashSet<String> = dates.iter().map(|d| d.to_string()).collect();

    let values = match string_values(df, &date_col) {
        Ok(values) => values,
        Err(e) => {
            log::warn!(
                "date column '{}' could not be decoded, treating table as empty: {}",
                date_col,
                e
            );
            return DataFrame::empty();
        }
    };

    let mask: Vec<bool> = values
        .iter()
        .map(|value| match value {
            Some(s) => {
                let day = if truncate {
                    s.split(' ').next().unwrap_or(s.as_str())
                } else {
                    s.as_str()
                };
                wanted.contains(day)
            }
            None => false,
        })
        .collect();

    let mask = BooleanChunked::from_slice("date_mask".into(), &mask);
    match df.filter(&mask) {
        Ok(filtered) => filtered,
        Err(e) => {
            log::warn!("date filter failed, treating table as empty: {}", e);
            DataFrame::empty()
        }
    }
}

/// Distinct non-null identifier values present in a frame, across every
/// identifier-like column.
pub fn identifier_values(df: &DataFrame) -> HashSet<String> {
    let mut values = HashSet::new();
    for column in identifier_columns(df) {
        match string_values(df, &column) {
            Ok(column_values) => values.extend(column_values.into_iter().flatten()),
            Err(e) => log::warn!("identifier column '{}' could not be decoded: {}", column, e),
        }
    }
    values
}
