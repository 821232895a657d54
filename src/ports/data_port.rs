//! Price history access port (the fetch collaborator).

use crate::domain::error::PriceAlignError;
use crate::domain::price_point::PricePoint;
use chrono::NaiveDate;

pub trait DataPort {
    /// Full daily close history for `symbol`, ascending by date with no
    /// repeated dates. Malformed source rows are already dropped.
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, PriceAlignError>;

    fn list_symbols(&self) -> Result<Vec<String>, PriceAlignError>;

    /// First date, last date and point count, or `None` for an empty history.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PriceAlignError> {
        let history = self.fetch_history(symbol)?;
        Ok(match (history.first(), history.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, history.len())),
            _ => None,
        })
    }
}
