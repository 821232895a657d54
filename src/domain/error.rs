//! Domain error types.

use crate::domain::selection::SelectionError;

/// Top-level error type for pricealign.
///
/// The aligner itself has no failure modes; every variant here belongs to a
/// boundary (data source, configuration, output) or to symbol selection.
#[derive(Debug, thiserror::Error)]
pub enum PriceAlignError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PriceAlignError> for std::process::ExitCode {
    fn from(err: &PriceAlignError) -> Self {
        let code: u8 = match err {
            PriceAlignError::Io(_)
            | PriceAlignError::Output { .. }
            | PriceAlignError::Json(_)
            | PriceAlignError::Csv(_) => 1,
            PriceAlignError::ConfigParse { .. }
            | PriceAlignError::ConfigMissing { .. }
            | PriceAlignError::ConfigInvalid { .. } => 2,
            PriceAlignError::DataSource { .. } => 3,
            PriceAlignError::Selection(_) => 4,
            PriceAlignError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
