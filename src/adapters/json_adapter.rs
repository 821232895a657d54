//! Quote-API JSON payload adapter.
//!
//! Reads one `<SYMBOL>.json` file per symbol, as saved from the quote API,
//! into explicit record types. Optional fields stay `Option`; an entry is
//! kept only when it has a parseable date and a finite close.

use crate::adapters::csv_adapter::{list_symbols_with_extension, symbol_file_path};
use crate::domain::error::PriceAlignError;
use crate::domain::price_point::{normalize_series, PricePoint};
use crate::ports::data_port::DataPort;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const EXTENSION: &str = "json";

#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl HistoryEntry {
    pub fn to_point(&self) -> Option<PricePoint> {
        PricePoint::parse(&self.date, self.close?)
    }
}

impl QuotePayload {
    pub fn from_json(content: &str) -> Result<Self, PriceAlignError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Valid points in ascending date order, plus how many entries were dropped.
    pub fn into_points(self) -> (Vec<PricePoint>, usize) {
        let total = self.history.len();
        let points: Vec<PricePoint> = self.history.iter().filter_map(HistoryEntry::to_point).collect();
        let dropped = total - points.len();
        (normalize_series(points), dropped)
    }
}

pub struct JsonQuoteAdapter {
    base_path: PathBuf,
}

impl JsonQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn json_path(&self, symbol: &str) -> PathBuf {
        symbol_file_path(&self.base_path, symbol, EXTENSION)
    }
}

impl DataPort for JsonQuoteAdapter {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, PriceAlignError> {
        let path = self.json_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| PriceAlignError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let payload = QuotePayload::from_json(&content)?;
        if !payload.symbol.eq_ignore_ascii_case(symbol) {
            tracing::warn!(
                requested = %symbol,
                payload = %payload.symbol,
                "payload symbol differs from file name"
            );
        }

        let (points, dropped) = payload.into_points();
        if dropped > 0 {
            tracing::warn!(%symbol, dropped, kept = points.len(), "dropped malformed history entries");
        }
        Ok(points)
    }

    fn list_symbols(&self) -> Result<Vec<String>, PriceAlignError> {
        list_symbols_with_extension(&self.base_path, EXTENSION)
    }
}
