//! Per-symbol price histories, keyed by upper-cased ticker.

use crate::domain::price_point::{normalize_series, PricePoint};
use crate::domain::selection::normalize_symbol;
use crate::ports::data_port::DataPort;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    series: BTreeMap<String, Vec<PricePoint>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every symbol through `port`. A failed fetch is logged and stored
    /// as an empty series so the remaining symbols still chart.
    pub fn load(port: &dyn DataPort, symbols: &[String]) -> Self {
        let mut store = Self::new();
        for symbol in symbols {
            let points = match port.fetch_history(symbol) {
                Ok(points) => {
                    tracing::debug!(%symbol, points = points.len(), "fetched history");
                    points
                }
                Err(e) => {
                    tracing::warn!(%symbol, error = %e, "fetch failed, treating as no data");
                    Vec::new()
                }
            };
            store.insert(symbol, points);
        }
        store
    }

    /// Insert or replace a series. The key is normalized and the points are
    /// sorted ascending with repeated dates collapsed. Blank symbols are ignored.
    pub fn insert(&mut self, symbol: &str, points: Vec<PricePoint>) {
        if let Some(key) = normalize_symbol(symbol) {
            self.series.insert(key, normalize_series(points));
        }
    }

    /// The series for `symbol`, or an empty slice when it was never fetched.
    /// Lookups normalize the symbol the same way `insert` does.
    pub fn get(&self, symbol: &str) -> &[PricePoint] {
        self.lookup(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    fn lookup(&self, symbol: &str) -> Option<&Vec<PricePoint>> {
        self.series
            .get(symbol)
            .or_else(|| normalize_symbol(symbol).and_then(|key| self.series.get(&key)))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
