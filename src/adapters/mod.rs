//! Concrete adapter implementations for ports.

pub mod csv_calendar_adapter;
pub mod csv_market_adapter;
pub mod csv_report_adapter;
pub mod demo_adapter;
pub mod file_config_adapter;
pub mod html_digest_adapter;
pub mod json_report_adapter;
