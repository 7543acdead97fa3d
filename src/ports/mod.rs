//! Port traits for the external collaborators.

pub mod calendar_port;
pub mod config_port;
pub mod market_data_port;
pub mod notification_port;
pub mod report_port;
