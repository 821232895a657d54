//! Symbol selection for multi-series charting.
//!
//! Selection order is significant: it decides series colour and the order
//! in which per-symbol summaries are shown. Symbols are upper-cased and kept
//! unique on insert.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("symbol not found: {0}")]
    UnknownSymbol(String),
}

/// Trim and upper-case a ticker. Returns `None` when nothing is left.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Parse a comma separated symbol list, rejecting empty tokens and duplicates.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, SelectionError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let symbol = normalize_symbol(token).ok_or(SelectionError::EmptyToken)?;
        if !seen.insert(symbol.clone()) {
            return Err(SelectionError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Outcome of a selection edit, handed back to the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added(String),
    AlreadySelected(String),
    Removed(String),
    NotSelected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSelection {
    symbols: Vec<String>,
}

impl SymbolSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, raw: &str) -> Result<SelectionChange, SelectionError> {
        let symbol = normalize_symbol(raw).ok_or(SelectionError::EmptyToken)?;
        if self.contains(&symbol) {
            return Ok(SelectionChange::AlreadySelected(symbol));
        }
        self.symbols.push(symbol.clone());
        Ok(SelectionChange::Added(symbol))
    }

    pub fn remove(&mut self, raw: &str) -> SelectionChange {
        let symbol = normalize_symbol(raw).unwrap_or_default();
        match self.symbols.iter().position(|s| *s == symbol) {
            Some(i) => {
                self.symbols.remove(i);
                SelectionChange::Removed(symbol)
            }
            None => SelectionChange::NotSelected(symbol),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Position of `symbol` in selection order, used for colour assignment.
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymbolSelection {
    /// Builds a selection, silently skipping blanks and repeats.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for raw in iter {
            let _ = selection.add(raw.as_ref());
        }
        selection
    }
}
