#![allow(dead_code)]

use chrono::NaiveDate;
use pricealign::domain::error::PriceAlignError;
pub use pricealign::domain::price_point::PricePoint;
use pricealign::domain::series_store::SeriesStore;
use pricealign::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, PriceAlignError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PriceAlignError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, PriceAlignError> {
        let mut symbols: Vec<String> = self
            .data
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn point(date_str: &str, price: f64) -> PricePoint {
    PricePoint::parse(date_str, price).unwrap()
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// `count` consecutive calendar days starting at `start`, price rising by 1.
pub fn generate_points(start: &str, count: usize, start_price: f64) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| PricePoint::new(start + chrono::Duration::days(i as i64), start_price + i as f64))
        .collect()
}

/// AAPL on the 1st and 3rd, MSFT on the 2nd of January 2024.
pub fn scenario_store() -> SeriesStore {
    let mut store = SeriesStore::new();
    store.insert("AAPL", vec![point("2024-01-01", 100.0), point("2024-01-03", 102.0)]);
    store.insert("MSFT", vec![point("2024-01-02", 50.0)]);
    store
}
