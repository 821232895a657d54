//! Per-symbol card figures over the active window.

use crate::domain::aligner::filter_by_range_at;
use crate::domain::series_store::SeriesStore;
use crate::domain::time_range::TimeRange;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub symbol: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub last_price: f64,
    /// Last close minus the previous close; zero with a single point.
    pub change: f64,
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
    pub points: usize,
}

impl SeriesSummary {
    /// `None` when the symbol has no points inside the window.
    pub fn compute(
        store: &SeriesStore,
        symbol: &str,
        range: TimeRange,
        today: NaiveDate,
    ) -> Option<Self> {
        let points = filter_by_range_at(store.get(symbol), range.days(), today);
        let first = points.first()?;
        let last = points.last()?;

        let prev_price = if points.len() > 1 {
            points[points.len() - 2].price
        } else {
            last.price
        };
        let change = last.price - prev_price;
        let change_pct = if prev_price != 0.0 {
            change / prev_price * 100.0
        } else {
            0.0
        };

        let high = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
        let low = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);

        Some(Self {
            symbol: symbol.to_string(),
            first_date: first.date,
            last_date: last.date,
            last_price: last.price,
            change,
            change_pct,
            high,
            low,
            points: points.len(),
        })
    }

    /// Summaries in selection order; symbols without data are skipped.
    pub fn compute_all(
        store: &SeriesStore,
        symbols: &[String],
        range: TimeRange,
        today: NaiveDate,
    ) -> Vec<Self> {
        symbols
            .iter()
            .filter_map(|s| Self::compute(store, s, range, today))
            .collect()
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
