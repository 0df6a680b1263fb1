//! Calendar types for status queries.
//!
//! All caller-facing dates are literal `YYYY-MM-DD` strings. [`DateStamp`]
//! validates that format at the boundary, before any store access; [`Period`]
//! expands a reference date into the full list of dates in its containing
//! ISO week or calendar month for the rollup summaries.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error for a caller-supplied date string that is not `YYYY-MM-DD`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid date '{0}': expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

/// A validated calendar date in `YYYY-MM-DD` form.
///
/// Construction is strict: the input must round-trip through the canonical
/// formatting, so `2025-6-5` or `2025-06-05T00:00:00` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateStamp(NaiveDate);

impl DateStamp {
    /// Parse and validate a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, InvalidDate> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| InvalidDate(s.to_string()))?;
        let stamp = Self(date);
        if stamp.to_string() != s {
            return Err(InvalidDate(s.to_string()));
        }
        Ok(stamp)
    }

    /// Wrap an already-validated calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in UTC, the default for dashboard queries.
    pub fn today_utc() -> Self {
        Self(chrono::Utc::now().date_naive())
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateStamp {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Kind of period a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
}

/// A contiguous list of calendar dates containing a reference date.
///
/// Derived deterministically from the reference date; immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    kind: PeriodType,
    reference: DateStamp,
    dates: Vec<DateStamp>,
}

impl Period {
    /// A single-day period.
    pub fn single(date: DateStamp) -> Self {
        Self {
            kind: PeriodType::Daily,
            reference: date,
            dates: vec![date],
        }
    }

    /// The Monday-start ISO week containing `date`, always 7 entries.
    pub fn week_of(date: DateStamp) -> Self {
        let offset = date.date().weekday().num_days_from_monday() as i64;
        let monday = date.date() - Duration::days(offset);
        let dates = (0..7)
            .map(|d| DateStamp::from_date(monday + Duration::days(d)))
            .collect();
        Self {
            kind: PeriodType::Weekly,
            reference: date,
            dates,
        }
    }

    /// Every day of the calendar month containing `date`, leap-aware.
    pub fn month_of(date: DateStamp) -> Self {
        let month = date.date().month();
        // day 1 always exists for a valid date
        let mut day = date.date().with_day(1).unwrap();
        let mut dates = Vec::new();
        while day.month() == month {
            dates.push(DateStamp::from_date(day));
            day = match day.succ_opt() {
                Some(next) => next,
                None => break, // end of the calendar
            };
        }
        Self {
            kind: PeriodType::Monthly,
            reference: date,
            dates,
        }
    }

    pub fn kind(&self) -> PeriodType {
        self.kind
    }

    pub fn reference(&self) -> DateStamp {
        self.reference
    }

    /// The dates of this period, in ascending order.
    pub fn dates(&self) -> &[DateStamp] {
        &self.dates
    }

    /// `first to last` label, or the single date for a daily period.
    pub fn range_label(&self) -> String {
        match self.dates.as_slice() {
            [] => self.reference.to_string(),
            [only] => only.to_string(),
            [first, .., last] => format!("{} to {}", first, last),
        }
    }
}
