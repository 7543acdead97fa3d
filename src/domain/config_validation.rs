//! Configuration validation.
//!
//! Validates all config fields before an analysis run. The `[data]` section
//! is checked separately since demo mode does not read it.

use tracing::warn;

use crate::domain::analysis::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_HORIZON_DAYS, DEFAULT_TOP_EVENTS, MAX_HISTORY_LIMIT,
};
use crate::domain::error::VolscanError;
use crate::domain::indicator::{DEFAULT_BAND_MULTIPLIER, DEFAULT_WINDOW};
use crate::domain::score::VolatilityWeights;
use crate::domain::symbols::parse_symbols;
use crate::ports::config_port::ConfigPort;

pub const MAX_HORIZON_DAYS: i64 = 365;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    validate_window(config)?;
    validate_band_multiplier(config)?;
    validate_history_limit(config)?;
    validate_horizon(config)?;
    validate_top_events(config)?;
    validate_symbols(config)?;
    validate_weights(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> VolscanError {
    VolscanError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    let value = config.get_int("analysis", "window", DEFAULT_WINDOW as i64);
    if value < 2 {
        return Err(invalid("analysis", "window", "window must be at least 2"));
    }
    Ok(())
}

fn validate_band_multiplier(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    let value = config.get_double("analysis", "band_multiplier", DEFAULT_BAND_MULTIPLIER);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            "analysis",
            "band_multiplier",
            "band_multiplier must be positive",
        ));
    }
    Ok(())
}

fn validate_history_limit(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    let value = config.get_int("analysis", "history_limit", DEFAULT_HISTORY_LIMIT as i64);
    if !(1..=MAX_HISTORY_LIMIT as i64).contains(&value) {
        return Err(invalid(
            "analysis",
            "history_limit",
            format!("history_limit must be between 1 and {}", MAX_HISTORY_LIMIT),
        ));
    }
    let window = config.get_int("analysis", "window", DEFAULT_WINDOW as i64);
    if value <= window {
        warn!(
            "history_limit {} is below window + 1 ({}); HV and ATR will be unavailable",
            value,
            window + 1
        );
    }
    Ok(())
}

fn validate_horizon(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    let value = config.get_int("analysis", "horizon_days", DEFAULT_HORIZON_DAYS as i64);
    if !(0..=MAX_HORIZON_DAYS).contains(&value) {
        return Err(invalid(
            "analysis",
            "horizon_days",
            format!("horizon_days must be between 0 and {}", MAX_HORIZON_DAYS),
        ));
    }
    Ok(())
}

fn validate_top_events(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    let value = config.get_int("report", "top_events", DEFAULT_TOP_EVENTS as i64);
    if value < 0 {
        return Err(invalid("report", "top_events", "top_events must be non-negative"));
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    match config.get_string("analysis", "symbols") {
        None => Ok(()),
        Some(raw) => parse_symbols(&raw)
            .map(|_| ())
            .map_err(|e| invalid("analysis", "symbols", e.to_string())),
    }
}

fn validate_weights(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    read_weights(config)
        .validate()
        .map_err(|reason| invalid("weights", "hv/atr/bbw/event", reason))
}

/// Weights from `[weights]`, falling back to the defaults per key.
pub fn read_weights(config: &dyn ConfigPort) -> VolatilityWeights {
    let defaults = VolatilityWeights::default();
    VolatilityWeights {
        hv: config.get_double("weights", "hv", defaults.hv),
        atr: config.get_double("weights", "atr", defaults.atr),
        bbw: config.get_double("weights", "bbw", defaults.bbw),
        event: config.get_double("weights", "event", defaults.event),
    }
}

/// `source` is `csv` (the default) or `demo`; csv needs both file locations.
pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), VolscanError> {
    match data_source(config).as_str() {
        "demo" => Ok(()),
        "csv" => {
            require_path(config, "candles_dir")?;
            require_path(config, "calendar_file")
        }
        other => Err(invalid(
            "data",
            "source",
            format!("unknown data source '{}', expected csv or demo", other),
        )),
    }
}

pub fn data_source(config: &dyn ConfigPort) -> String {
    config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string())
        .trim()
        .to_lowercase()
}

fn require_path(config: &dyn ConfigPort, key: &str) -> Result<(), VolscanError> {
    match config.get_string("data", key) {
        Some(path) if !path.trim().is_empty() => Ok(()),
        _ => Err(VolscanError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
    }
}
