//! Core domain types and logic.

pub mod analysis;
pub mod calendar;
pub mod candle;
pub mod config_validation;
pub mod error;
pub mod event_impact;
pub mod indicator;
pub mod indicator_helpers;
pub mod recommendation;
pub mod report;
pub mod score;
pub mod symbols;
