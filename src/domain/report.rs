//! Per-run report and the run-level facts derived from it.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::calendar::{sort_chronologically, CalendarEvent, Impact};
use crate::domain::event_impact::EventImpactScore;
use crate::domain::indicator::IndicatorSet;
use crate::domain::recommendation::Recommendation;
use crate::domain::score::{ScoreBreakdown, VolatilityScore};

pub const ELEVATED_REGIME_ABOVE: f64 = 0.6;
pub const LOW_REGIME_BELOW: f64 = 0.3;
pub const MULTIPLE_HIGH_IMPACT_EVENTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub symbol: String,
    /// Most recent close.
    pub price: f64,
    pub candles: usize,
    pub indicators: IndicatorSet,
    pub breakdown: ScoreBreakdown,
    pub volatility_score: VolatilityScore,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NoData,
    DataSource { reason: String },
    MalformedInput { reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::DataSource { reason } => write!(f, "data source: {}", reason),
            SkipReason::MalformedInput { reason } => write!(f, "malformed input: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedAsset {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub run_date: NaiveDate,
    pub event_impact: EventImpactScore,
    /// Chronological.
    pub events: Vec<CalendarEvent>,
    pub assets: BTreeMap<String, AssetReport>,
    pub skipped: Vec<SkippedAsset>,
}

impl Report {
    pub fn new(
        run_date: NaiveDate,
        event_impact: EventImpactScore,
        mut events: Vec<CalendarEvent>,
    ) -> Self {
        sort_chronologically(&mut events);
        Self {
            run_date,
            event_impact,
            events,
            assets: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    pub fn insert(&mut self, asset: AssetReport) {
        self.assets.insert(asset.symbol.clone(), asset);
    }

    pub fn skip(&mut self, symbol: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedAsset {
            symbol: symbol.into(),
            reason,
        });
    }

    pub fn average_volatility(&self) -> Option<f64> {
        if self.assets.is_empty() {
            return None;
        }
        let total: f64 = self.assets.values().map(|a| a.volatility_score.value()).sum();
        Some(total / self.assets.len() as f64)
    }

    /// Highest volatility score; the first symbol in order wins ties.
    pub fn most_volatile(&self) -> Option<&AssetReport> {
        self.assets.values().reduce(|best, a| {
            if a.volatility_score.value() > best.volatility_score.value() {
                a
            } else {
                best
            }
        })
    }

    /// Earliest event on or after the run date.
    pub fn nearest_event(&self) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.date >= self.run_date)
    }

    pub fn top_events(&self, n: usize) -> &[CalendarEvent] {
        &self.events[..n.min(self.events.len())]
    }

    pub fn high_impact_events(&self) -> usize {
        self.events.iter().filter(|e| e.impact == Impact::High).count()
    }

    pub fn summary(&self, top_n: usize) -> RunSummary<'_> {
        RunSummary {
            run_date: self.run_date,
            average_volatility: self.average_volatility(),
            most_volatile: self.most_volatile(),
            nearest_event: self.nearest_event(),
            top_events: self.top_events(top_n),
            high_impact_events: self.high_impact_events(),
            regime: self.average_volatility().map(MarketRegime::from_average),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketRegime {
    Elevated,
    Moderate,
    Low,
}

impl MarketRegime {
    pub fn from_average(average: f64) -> Self {
        if average > ELEVATED_REGIME_ABOVE {
            MarketRegime::Elevated
        } else if average < LOW_REGIME_BELOW {
            MarketRegime::Low
        } else {
            MarketRegime::Moderate
        }
    }

    pub fn insight(&self) -> &'static str {
        match self {
            MarketRegime::Elevated => {
                "Markets are experiencing elevated volatility, suggesting potential for \
                 significant price swings."
            }
            MarketRegime::Moderate => {
                "Markets are showing moderate volatility, suitable for standard trading approaches."
            }
            MarketRegime::Low => {
                "Markets are in a low volatility regime, potentially building energy for \
                 future directional moves."
            }
        }
    }
}

/// Run-level facts for the notification digest. Borrowed from the report,
/// never stored separately.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary<'a> {
    pub run_date: NaiveDate,
    pub average_volatility: Option<f64>,
    pub most_volatile: Option<&'a AssetReport>,
    pub nearest_event: Option<&'a CalendarEvent>,
    pub top_events: &'a [CalendarEvent],
    pub high_impact_events: usize,
    pub regime: Option<MarketRegime>,
}

impl RunSummary<'_> {
    pub fn multiple_high_impact_events(&self) -> bool {
        self.high_impact_events >= MULTIPLE_HIGH_IMPACT_EVENTS
    }
}
