//! Configuration validation.
//!
//! Checks every value that is present in the config before a pipeline runs.
//! Keys that a CLI flag may supply instead are not required here.

use crate::domain::error::PriceAlignError;
use crate::domain::selection::parse_symbols;
use crate::domain::settings::{OutputFormat, SourceFormat};
use crate::domain::time_range::TimeRange;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    validate_source_format(config)?;
    validate_symbols(config)?;
    validate_range(config)?;
    validate_as_of(config)?;
    validate_output_format(config)?;
    validate_chart_size(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> PriceAlignError {
    PriceAlignError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_source_format(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    if let Some(value) = config.get_non_empty("data", "format") {
        value
            .parse::<SourceFormat>()
            .map_err(|reason| invalid("data", "format", reason))?;
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    if let Some(value) = config.get_non_empty("analysis", "symbols") {
        parse_symbols(&value).map_err(|e| invalid("analysis", "symbols", e.to_string()))?;
    }
    Ok(())
}

fn validate_range(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    if let Some(value) = config.get_non_empty("analysis", "range") {
        value
            .parse::<TimeRange>()
            .map_err(|e| invalid("analysis", "range", e.to_string()))?;
    }
    Ok(())
}

fn validate_as_of(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    if let Some(value) = config.get_non_empty("analysis", "as_of") {
        parse_date(&value, "analysis", "as_of")?;
    }
    Ok(())
}

pub(crate) fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, PriceAlignError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(section, key, format!("invalid {key} format, expected YYYY-MM-DD")))
}

fn validate_output_format(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    if let Some(value) = config.get_non_empty("output", "format") {
        value
            .parse::<OutputFormat>()
            .map_err(|reason| invalid("output", "format", reason))?;
    }
    Ok(())
}

fn validate_chart_size(config: &dyn ConfigPort) -> Result<(), PriceAlignError> {
    for key in ["width", "height"] {
        let value = config.get_int("chart", key, 1);
        if value <= 0 || value > u32::MAX as i64 {
            return Err(invalid("chart", key, format!("{key} must be a positive integer")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let config = make_config(
            r#"
[data]
dir = ./data
format = json

[analysis]
symbols = AAPL,MSFT
range = 6M
as_of = 2024-01-31

[output]
format = svg
path = chart.svg

[chart]
width = 640
height = 320
"#,
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_config_passes() {
        assert!(validate_config(&FileConfigAdapter::empty()).is_ok());
    }

    #[test]
    fn unknown_source_format_fails() {
        let config = make_config("[data]\nformat = parquet\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "format"));
    }

    #[test]
    fn duplicate_symbols_fail() {
        let config = make_config("[analysis]\nsymbols = AAPL,aapl\n");
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, PriceAlignError::ConfigInvalid { key, reason, .. } if key == "symbols" && reason.contains("AAPL"))
        );
    }

    #[test]
    fn empty_symbol_token_fails() {
        let config = make_config("[analysis]\nsymbols = AAPL,,MSFT\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "symbols"));
    }

    #[test]
    fn unknown_range_fails() {
        let config = make_config("[analysis]\nrange = 5Y\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "range"));
    }

    #[test]
    fn bad_as_of_fails() {
        let config = make_config("[analysis]\nas_of = 31/01/2024\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "as_of"));
    }

    #[test]
    fn unknown_output_format_fails() {
        let config = make_config("[output]\nformat = png\n");
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, PriceAlignError::ConfigInvalid { section, .. } if section == "output")
        );
    }

    #[test]
    fn zero_chart_width_fails() {
        let config = make_config("[chart]\nwidth = 0\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "width"));
    }

    #[test]
    fn negative_chart_height_fails() {
        let config = make_config("[chart]\nheight = -10\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PriceAlignError::ConfigInvalid { key, .. } if key == "height"));
    }
}
