//! Port traits between the domain and the outside world.

pub mod data_port;
pub mod config_port;
pub mod chart_port;
