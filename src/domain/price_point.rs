//! Daily closing price observation.

use chrono::NaiveDate;

/// One trading day's closing price for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Parse a `YYYY-MM-DD` date and attach `price`.
    ///
    /// Returns `None` for a malformed date or a non-finite price; the data
    /// adapters drop such rows before they reach the store.
    pub fn parse(date: &str, price: f64) -> Option<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
        price.is_finite().then_some(Self { date, price })
    }
}

/// Sort ascending by date and keep the last observation for a repeated date.
pub fn normalize_series(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    // stable sort keeps input order among equal dates
    points.sort_by_key(|p| p.date);
    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }
    out
}
