//! Recommendation classifier.
//!
//! An ordered table of five volatility bands, highest first. Each band owns an
//! event-impact threshold that splits it into a high-event and a low-event
//! outcome. Both comparisons are strict `>`: a score sitting on a band's floor
//! belongs to the band below, and an impact equal to the threshold takes the
//! low-event outcome. The last band has floor 0 and catches everything left,
//! so the ten outcomes partition [0, 1] × [0, 1].

use serde::Serialize;
use std::fmt;

use crate::domain::event_impact::EventImpactScore;
use crate::domain::score::VolatilityScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SCALP ONLY")]
    ScalpOnly,
    #[serde(rename = "REDUCE EXPOSURE")]
    ReduceExposure,
    #[serde(rename = "TRADE WITH CAUTION")]
    TradeWithCaution,
    #[serde(rename = "SELECTIVE TRADING")]
    SelectiveTrading,
    #[serde(rename = "TRADE NORMALLY")]
    TradeNormally,
    #[serde(rename = "PREPARE FOR VOLATILITY")]
    PrepareForVolatility,
    #[serde(rename = "LONGER TIMEFRAMES")]
    LongerTimeframes,
    #[serde(rename = "PREPARE FOR BREAKOUTS")]
    PrepareForBreakouts,
    #[serde(rename = "RANGE TRADING")]
    RangeTrading,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Hold => "HOLD",
            Action::ScalpOnly => "SCALP ONLY",
            Action::ReduceExposure => "REDUCE EXPOSURE",
            Action::TradeWithCaution => "TRADE WITH CAUTION",
            Action::SelectiveTrading => "SELECTIVE TRADING",
            Action::TradeNormally => "TRADE NORMALLY",
            Action::PrepareForVolatility => "PREPARE FOR VOLATILITY",
            Action::LongerTimeframes => "LONGER TIMEFRAMES",
            Action::PrepareForBreakouts => "PREPARE FOR BREAKOUTS",
            Action::RangeTrading => "RANGE TRADING",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Extreme,
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Elevated,
    Moderate,
    Normal,
    #[serde(rename = "Low but increasing")]
    LowButIncreasing,
    Low,
    #[serde(rename = "Very Low but watch")]
    VeryLowButWatch,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Extreme => "Extreme",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::High => "High",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Normal => "Normal",
            RiskLevel::LowButIncreasing => "Low but increasing",
            RiskLevel::Low => "Low",
            RiskLevel::VeryLowButWatch => "Very Low but watch",
            RiskLevel::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    pub risk: RiskLevel,
    pub strategy: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityBand {
    /// Exclusive lower bound; the last band's floor of 0 is inclusive.
    pub floor: f64,
    pub ceiling: f64,
    pub event_threshold: f64,
    pub high_event: Outcome,
    pub low_event: Outcome,
}

impl VolatilityBand {
    pub fn outcome_for(&self, event_impact: f64) -> &Outcome {
        if event_impact > self.event_threshold {
            &self.high_event
        } else {
            &self.low_event
        }
    }
}

pub static RULE_TABLE: [VolatilityBand; 5] = [
    VolatilityBand {
        floor: 0.8,
        ceiling: 1.0,
        event_threshold: 0.7,
        high_event: Outcome {
            action: Action::Hold,
            risk: RiskLevel::Extreme,
            strategy: "Avoid new positions due to extreme volatility and high-impact events",
        },
        low_event: Outcome {
            action: Action::ScalpOnly,
            risk: RiskLevel::VeryHigh,
            strategy: "Short-term scalping only with tight stop losses",
        },
    },
    VolatilityBand {
        floor: 0.6,
        ceiling: 0.8,
        event_threshold: 0.6,
        high_event: Outcome {
            action: Action::ReduceExposure,
            risk: RiskLevel::High,
            strategy: "Reduce position sizes and set tighter stop losses",
        },
        low_event: Outcome {
            action: Action::TradeWithCaution,
            risk: RiskLevel::Elevated,
            strategy: "Trade with reduced position sizes",
        },
    },
    VolatilityBand {
        floor: 0.4,
        ceiling: 0.6,
        event_threshold: 0.5,
        high_event: Outcome {
            action: Action::SelectiveTrading,
            risk: RiskLevel::Moderate,
            strategy: "Focus on strongest setups and major support/resistance levels",
        },
        low_event: Outcome {
            action: Action::TradeNormally,
            risk: RiskLevel::Normal,
            strategy: "Standard position sizing and risk management",
        },
    },
    VolatilityBand {
        floor: 0.2,
        ceiling: 0.4,
        event_threshold: 0.6,
        high_event: Outcome {
            action: Action::PrepareForVolatility,
            risk: RiskLevel::LowButIncreasing,
            strategy: "Position for potential volatility increase after events",
        },
        low_event: Outcome {
            action: Action::LongerTimeframes,
            risk: RiskLevel::Low,
            strategy: "Focus on longer timeframe setups with wider stops",
        },
    },
    VolatilityBand {
        floor: 0.0,
        ceiling: 0.2,
        event_threshold: 0.5,
        high_event: Outcome {
            action: Action::PrepareForBreakouts,
            risk: RiskLevel::VeryLowButWatch,
            strategy: "Look for breakout setups triggered by upcoming events",
        },
        low_event: Outcome {
            action: Action::RangeTrading,
            risk: RiskLevel::VeryLow,
            strategy: "Focus on range-bound strategies and accumulation",
        },
    },
];

/// The band a score falls in: the first whose floor it strictly exceeds,
/// otherwise the bottom band.
pub fn band_for(volatility_score: f64) -> &'static VolatilityBand {
    const BOTTOM: usize = RULE_TABLE.len() - 1;
    RULE_TABLE[..BOTTOM]
        .iter()
        .find(|band| volatility_score > band.floor)
        .unwrap_or(&RULE_TABLE[BOTTOM])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    pub risk_level: RiskLevel,
    pub strategy: String,
    pub volatility_score: VolatilityScore,
    pub event_impact: EventImpactScore,
}

pub fn classify(
    volatility_score: VolatilityScore,
    event_impact: EventImpactScore,
) -> Recommendation {
    let outcome = band_for(volatility_score.value()).outcome_for(event_impact.value());
    Recommendation {
        action: outcome.action,
        risk_level: outcome.risk,
        strategy: outcome.strategy.to_string(),
        volatility_score,
        event_impact,
    }
}
