//! Date alignment of several symbols' price series into one chart table.
//!
//! Each selected symbol's history is cut to the active lookback window, the
//! surviving dates are unioned across symbols, and one row is produced per
//! date with a value (or an explicit gap) for every selected symbol.

use crate::domain::price_point::PricePoint;
use crate::domain::series_store::SeriesStore;
use crate::domain::time_range::cutoff_date;
use chrono::{Local, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeSet, HashMap};

/// One x-axis point: the date plus each selected symbol's close, in
/// selection order. `None` marks a gap, never a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub prices: Vec<(String, Option<f64>)>,
}

impl AlignedRow {
    /// The price for `symbol` on this row, `None` when absent.
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.field(symbol).flatten()
    }

    /// `Some(value)` when the row carries a key for `symbol`, present or not.
    pub fn field(&self, symbol: &str) -> Option<Option<f64>> {
        self.prices
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| *v)
    }
}

impl Serialize for AlignedRow {
    /// `{"date": "2024-01-01", "AAPL": 100.0, "MSFT": null}`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.prices.len() + 1))?;
        map.serialize_entry("date", &self.date.format("%Y-%m-%d").to_string())?;
        for (symbol, price) in &self.prices {
            map.serialize_entry(symbol, price)?;
        }
        map.end()
    }
}

/// A symbol's windowed series with a date lookup index.
#[derive(Debug, Clone)]
pub struct FilteredSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
    pub date_index: HashMap<NaiveDate, usize>,
}

impl FilteredSeries {
    pub fn new(symbol: String, points: Vec<PricePoint>) -> Self {
        let date_index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Self {
            symbol,
            points,
            date_index,
        }
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.date_index.get(&date).map(|&i| self.points[i].price)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Points dated on or after `today - days`, order preserved. Lookbacks
/// beyond the calendar range keep every point instead of failing.
pub fn filter_by_range(series: &[PricePoint], days: i64) -> Vec<PricePoint> {
    filter_by_range_at(series, days, today())
}

pub fn filter_by_range_at(series: &[PricePoint], days: i64, today: NaiveDate) -> Vec<PricePoint> {
    let cutoff = cutoff_date(today, days);
    series.iter().filter(|p| p.date >= cutoff).copied().collect()
}

/// Distinct dates across all series, ascending.
pub fn build_unified_timeline(series: &[FilteredSeries]) -> Vec<NaiveDate> {
    let unique_dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|fs| fs.points.iter().map(|p| p.date))
        .collect();
    unique_dates.into_iter().collect()
}

pub fn align(store: &SeriesStore, symbols: &[String], days: i64) -> Vec<AlignedRow> {
    align_at(store, symbols, days, today())
}

/// Align `symbols` against a fixed `today`. Symbols missing from `store`
/// contribute no dates and show as gaps on every row.
pub fn align_at(
    store: &SeriesStore,
    symbols: &[String],
    days: i64,
    today: NaiveDate,
) -> Vec<AlignedRow> {
    if symbols.is_empty() {
        return Vec::new();
    }

    let filtered: Vec<FilteredSeries> = symbols
        .iter()
        .map(|s| FilteredSeries::new(s.clone(), filter_by_range_at(store.get(s), days, today)))
        .collect();

    build_unified_timeline(&filtered)
        .into_iter()
        .map(|date| AlignedRow {
            date,
            prices: filtered
                .iter()
                .map(|fs| (fs.symbol.clone(), fs.price_on(date)))
                .collect(),
        })
        .collect()
}
