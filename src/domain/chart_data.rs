//! Everything a chart renderer needs for one multi-series plot.

use crate::domain::aligner::{align_at, AlignedRow};
use crate::domain::palette::colors_for;
use crate::domain::series_store::SeriesStore;
use crate::domain::time_range::TimeRange;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub symbols: Vec<String>,
    /// One colour per symbol, same order as `symbols`.
    pub colors: Vec<&'static str>,
    pub range: TimeRange,
    pub rows: Vec<AlignedRow>,
}

impl ChartData {
    pub fn build(
        store: &SeriesStore,
        symbols: &[String],
        range: TimeRange,
        today: NaiveDate,
    ) -> Self {
        Self {
            symbols: symbols.to_vec(),
            colors: colors_for(symbols),
            range,
            rows: align_at(store, symbols, range.days(), today),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest and largest present price across every series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|r| r.prices.iter().filter_map(|(_, v)| *v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
