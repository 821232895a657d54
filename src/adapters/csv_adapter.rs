//! CSV file data adapter.
//!
//! One `<SYMBOL>.csv` file per symbol with a header row. The `date` and
//! `close` columns are found by header name; rows that fail to parse are
//! dropped with a warning so they never reach the series store.

use crate::domain::error::PriceAlignError;
use crate::domain::price_point::{normalize_series, PricePoint};
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        symbol_file_path(&self.base_path, symbol, EXTENSION)
    }
}

/// Column positions for date and close. Falls back to the classic
/// `date,open,high,low,close,volume` layout when the header has no names.
fn locate_columns(headers: &csv::StringRecord) -> (usize, usize) {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let date_col = find("date").unwrap_or(0);
    let close_col = find("close")
        .or_else(|| find("adj_close"))
        .or_else(|| find("price"))
        .unwrap_or(4);
    (date_col, close_col)
}

impl DataPort for CsvAdapter {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, PriceAlignError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| PriceAlignError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let (date_col, close_col) = locate_columns(rdr.headers()?);

        let mut points = Vec::new();
        let mut dropped = 0usize;

        for (line, result) in rdr.records().enumerate() {
            let record = result?;
            let point = match (record.get(date_col), record.get(close_col)) {
                (Some(date), Some(close)) => close
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(|price| PricePoint::parse(date, price)),
                _ => None,
            };

            match point {
                Some(p) => points.push(p),
                None => {
                    dropped += 1;
                    tracing::warn!(%symbol, row = line + 2, "dropping malformed price row");
                }
            }
        }

        if dropped > 0 {
            tracing::info!(%symbol, dropped, kept = points.len(), "skipped malformed rows");
        }

        Ok(normalize_series(points))
    }

    fn list_symbols(&self) -> Result<Vec<String>, PriceAlignError> {
        list_symbols_with_extension(&self.base_path, EXTENSION)
    }
}

/// `(upper-cased stem, path)` for every `*.<extension>` file in `dir`.
fn symbol_files(dir: &Path, extension: &str) -> Result<Vec<(String, PathBuf)>, PriceAlignError> {
    let entries = fs::read_dir(dir).map_err(|e| PriceAlignError::DataSource {
        reason: format!("failed to read directory {}: {}", dir.display(), e),
    })?;

    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| PriceAlignError::DataSource {
            reason: format!("directory entry error: {}", e),
        })?;

        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            files.push((stem.to_string_lossy().to_uppercase(), path));
        }
    }

    Ok(files)
}

/// Upper-cased file stems of every `*.<extension>` file in `dir`, sorted.
pub(crate) fn list_symbols_with_extension(
    dir: &Path,
    extension: &str,
) -> Result<Vec<String>, PriceAlignError> {
    let mut symbols: Vec<String> = symbol_files(dir, extension)?
        .into_iter()
        .map(|(symbol, _)| symbol)
        .collect();
    symbols.sort();
    symbols.dedup();
    Ok(symbols)
}

/// File holding `symbol`'s history. `<SYMBOL>.<ext>` wins when it exists;
/// otherwise any file whose stem matches ignoring case, so `aapl.csv` serves
/// `AAPL`. Falls back to the exact name so a miss reports that path.
pub(crate) fn symbol_file_path(dir: &Path, symbol: &str, extension: &str) -> PathBuf {
    let exact = dir.join(format!("{}.{}", symbol, extension));
    if exact.is_file() {
        return exact;
    }
    let wanted = symbol.to_uppercase();
    symbol_files(dir, extension)
        .ok()
        .and_then(|files| {
            files
                .into_iter()
                .filter(|(stem, _)| *stem == wanted)
                .map(|(_, path)| path)
                .min()
        })
        .unwrap_or(exact)
}
