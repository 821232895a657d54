//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod json_adapter;
pub mod file_config_adapter;
pub mod table_writer;
pub mod svg_chart;
