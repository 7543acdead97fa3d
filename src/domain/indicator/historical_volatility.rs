//! Historical Volatility.
//!
//! HV = sample stddev of the most recent `window` log returns × sqrt(365).
//! Needs `window` returns, i.e. `window + 1` candles.

use crate::domain::candle::{closes, Candle};
use crate::domain::indicator::IndicatorReading;
use crate::domain::indicator_helpers::{log_returns, sample_stddev, trailing};

/// Crypto trades every calendar day.
pub const PERIODS_PER_YEAR: f64 = 365.0;

pub fn historical_volatility(candles: &[Candle], window: usize) -> IndicatorReading {
    let need = window + 1;
    let insufficient = IndicatorReading::Insufficient {
        have: candles.len(),
        need,
    };

    let returns = log_returns(&closes(candles));
    let Some(recent) = trailing(&returns, window) else {
        return insufficient;
    };
    match sample_stddev(recent) {
        Some(std) => IndicatorReading::Calculated(std * PERIODS_PER_YEAR.sqrt()),
        None => insufficient,
    }
}
