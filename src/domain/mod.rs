//! Core domain types and logic.

pub mod price_point;
pub mod series_store;
pub mod selection;
pub mod time_range;
pub mod aligner;
pub mod palette;
pub mod chart_data;
pub mod summary;
pub mod settings;
pub mod config_validation;
pub mod error;
