//! Volatility indicators computed from a daily candle series.
//!
//! - `IndicatorReading`: a calculated value, or the reason there is none
//! - `IndicatorParams`: window size and Bollinger band multiplier
//! - `IndicatorSet`: HV, normalized ATR and BBW for one asset

pub mod atr;
pub mod bollinger;
pub mod historical_volatility;

use serde::{Serialize, Serializer};
use std::fmt;

use crate::domain::candle::Candle;

pub const DEFAULT_WINDOW: usize = 14;
pub const DEFAULT_BAND_MULTIPLIER: f64 = 2.0;

/// Outcome of one indicator calculation.
///
/// `Insufficient` is not an error: short series are expected and the blender
/// substitutes zero for them. Keeping it distinct from `Calculated(0.0)` lets
/// callers tell a flat market from missing history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorReading {
    Calculated(f64),
    Insufficient { have: usize, need: usize },
}

impl IndicatorReading {
    pub fn value(&self) -> Option<f64> {
        match self {
            IndicatorReading::Calculated(v) => Some(*v),
            IndicatorReading::Insufficient { .. } => None,
        }
    }

    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self, IndicatorReading::Calculated(_))
    }
}

impl fmt::Display for IndicatorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorReading::Calculated(v) => write!(f, "{:.4}", v),
            IndicatorReading::Insufficient { have, need } => {
                write!(f, "n/a ({}/{} candles)", have, need)
            }
        }
    }
}

// Reports carry `null` for readings without enough history.
impl Serialize for IndicatorReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub window: usize,
    pub band_multiplier: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            band_multiplier: DEFAULT_BAND_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub hv: IndicatorReading,
    pub atr: IndicatorReading,
    pub bbw: IndicatorReading,
}

impl IndicatorSet {
    pub fn compute(candles: &[Candle], params: &IndicatorParams) -> Self {
        Self {
            hv: historical_volatility::historical_volatility(candles, params.window),
            atr: atr::normalized_atr(candles, params.window),
            bbw: bollinger::bollinger_band_width(candles, params.window, params.band_multiplier),
        }
    }

    pub fn all_calculated(&self) -> bool {
        self.hv.is_calculated() && self.atr.is_calculated() && self.bbw.is_calculated()
    }
}
