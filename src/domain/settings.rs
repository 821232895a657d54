//! Resolved run settings for the align/chart/summary pipelines.

use crate::domain::time_range::TimeRange;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_CHART_WIDTH: i64 = 800;
pub const DEFAULT_CHART_HEIGHT: i64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            other => Err(format!("unknown source format '{other}' (expected csv or json)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Svg,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(format!(
                "unknown output format '{other}' (expected csv, json or svg)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub data_dir: PathBuf,
    pub source_format: SourceFormat,
    pub symbols: Vec<String>,
    pub range: TimeRange,
    /// Fixed end of the window; the local date when unset.
    pub as_of: Option<NaiveDate>,
    pub output_format: OutputFormat,
    pub output_path: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl AnalysisSettings {
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(crate::domain::aligner::today)
    }
}
