//! Volatility score blending.
//!
//! Stage 1 (per asset): `hv·min(1, hv) + atr·min(1, atr×10) + bbw·min(1, bbw×5)`
//! using the indicator weights. Stage 2 folds in the run-wide event impact:
//! `partial·(1 - event) + impact·event`.

use serde::Serialize;
use std::fmt;

use crate::domain::event_impact::EventImpactScore;
use crate::domain::indicator::IndicatorSet;

/// ATR is a small fraction of price; ×10 maps its typical high range near 1.
pub const ATR_SCALE: f64 = 10.0;
/// BBW is a small fraction of the SMA; ×5 maps its typical high range near 1.
pub const BBW_SCALE: f64 = 5.0;
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityWeights {
    pub hv: f64,
    pub atr: f64,
    pub bbw: f64,
    pub event: f64,
}

impl Default for VolatilityWeights {
    fn default() -> Self {
        Self {
            hv: 0.3,
            atr: 0.3,
            bbw: 0.2,
            event: 0.2,
        }
    }
}

impl VolatilityWeights {
    /// Every weight in [0, 1] and the indicator weights summing to at most 1,
    /// so both blend stages stay inside [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [
            ("hv", self.hv),
            ("atr", self.atr),
            ("bbw", self.bbw),
            ("event", self.event),
        ] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(format!("weight {name} must be within [0, 1], got {w}"));
            }
        }
        let indicator_sum = self.hv + self.atr + self.bbw;
        if indicator_sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(format!(
                "hv + atr + bbw weights must not exceed 1, got {indicator_sum}"
            ));
        }
        Ok(())
    }
}

/// Final volatility score in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct VolatilityScore(f64);

impl VolatilityScore {
    /// Clamps into [0, 1]; NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for VolatilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Per-indicator contributions, each in [0, 1] before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub hv_contribution: f64,
    pub atr_contribution: f64,
    pub bbw_contribution: f64,
    pub partial_score: f64,
}

impl ScoreBreakdown {
    pub fn compute(indicators: &IndicatorSet, weights: &VolatilityWeights) -> Self {
        let hv_contribution = unit(indicators.hv.or_zero());
        let atr_contribution = unit(indicators.atr.or_zero() * ATR_SCALE);
        let bbw_contribution = unit(indicators.bbw.or_zero() * BBW_SCALE);
        let partial_score = unit(
            weights.hv * hv_contribution
                + weights.atr * atr_contribution
                + weights.bbw * bbw_contribution,
        );
        Self {
            hv_contribution,
            atr_contribution,
            bbw_contribution,
            partial_score,
        }
    }
}

pub fn final_score(
    partial: f64,
    event_impact: EventImpactScore,
    weights: &VolatilityWeights,
) -> VolatilityScore {
    let event = weights.event;
    VolatilityScore::new(unit(partial) * (1.0 - event) + event_impact.value() * event)
}
