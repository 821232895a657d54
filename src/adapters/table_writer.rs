//! Aligned-table writers: CSV and JSON.
//!
//! Both keep one column (or key) per selected symbol on every row. An absent
//! price is an empty CSV cell or a JSON `null`, never a zero.

use crate::domain::chart_data::ChartData;
use crate::domain::error::PriceAlignError;
use crate::ports::chart_port::ChartPort;

#[derive(Debug, Default)]
pub struct CsvTableWriter;

impl ChartPort for CsvTableWriter {
    fn render(&self, chart: &ChartData) -> Result<String, PriceAlignError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["date".to_string()];
        header.extend(chart.symbols.iter().cloned());
        wtr.write_record(&header)?;

        for row in &chart.rows {
            let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
            record.extend(
                chart
                    .symbols
                    .iter()
                    .map(|s| row.price(s).map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        let bytes = wtr.into_inner().map_err(|e| PriceAlignError::Output {
            reason: format!("CSV flush failed: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| PriceAlignError::Output {
            reason: format!("CSV output is not UTF-8: {}", e),
        })
    }
}

#[derive(Debug, Default)]
pub struct JsonTableWriter {
    pub pretty: bool,
}

impl ChartPort for JsonTableWriter {
    fn render(&self, chart: &ChartData) -> Result<String, PriceAlignError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&chart.rows)?
        } else {
            serde_json::to_string(&chart.rows)?
        };
        Ok(json)
    }
}
