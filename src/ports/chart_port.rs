//! Chart rendering port trait.

use crate::domain::chart_data::ChartData;
use crate::domain::error::PriceAlignError;
use std::fs;
use std::path::Path;

/// Port for turning aligned rows into an output document.
pub trait ChartPort {
    fn render(&self, chart: &ChartData) -> Result<String, PriceAlignError>;

    /// Default implementation: renders, creates parent directories, writes.
    fn write(&self, chart: &ChartData, output_path: &Path) -> Result<(), PriceAlignError> {
        let content = self.render(chart)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}
