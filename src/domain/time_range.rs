//! Chart lookback windows.

use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    Week,
    Month,
    SixMonths,
    #[default]
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range '{0}' (expected 1W, 1M, 6M or 1Y)")]
pub struct ParseTimeRangeError(pub String);

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::SixMonths,
        TimeRange::Year,
    ];

    /// Calendar lookback in days.
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::SixMonths => 182,
            TimeRange::Year => 365,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TimeRange::Week => "1W",
            TimeRange::Month => "1M",
            TimeRange::SixMonths => "6M",
            TimeRange::Year => "1Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Week => "Last Week",
            TimeRange::Month => "Last Month",
            TimeRange::SixMonths => "Last 6 Months",
            TimeRange::Year => "Last Year",
        }
    }

    /// Earliest date kept when the window ends on `today`.
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        cutoff_date(today, self.days())
    }

    /// X-axis tick text: month for a one-year window, month-day otherwise.
    pub fn tick_label(self, date: NaiveDate) -> String {
        match self {
            TimeRange::Year => date.format("%m").to_string(),
            _ => date.format("%m-%d").to_string(),
        }
    }
}

/// `today - days`, saturating at the calendar limits: a lookback past the
/// earliest representable date keeps everything, a negative one past the
/// latest keeps nothing.
pub fn cutoff_date(today: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|span| today.checked_sub_signed(span))
        .unwrap_or(if days < 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1W" => Ok(TimeRange::Week),
            "1M" => Ok(TimeRange::Month),
            "6M" => Ok(TimeRange::SixMonths),
            "1Y" => Ok(TimeRange::Year),
            _ => Err(ParseTimeRangeError(s.to_string())),
        }
    }
}
