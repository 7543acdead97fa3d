//! Event impact score: how much near-term macro event risk is in play.
//!
//! Each event contributes `severity × max(0, (7 - days_until) / 7)`. The sum
//! is divided by 3 and clamped to [0, 1]. Past events have a negative
//! `days_until` and so a recency weight above 1; that is kept as-is and only
//! the final score is clamped.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::domain::calendar::CalendarEvent;

pub const RECENCY_HORIZON_DAYS: f64 = 7.0;
pub const IMPACT_NORMALIZER: f64 = 3.0;

/// Run-wide event impact in [0, 1]. Independent of any asset.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct EventImpactScore(f64);

impl EventImpactScore {
    pub const ZERO: EventImpactScore = EventImpactScore(0.0);

    /// Clamps into [0, 1]; NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for EventImpactScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub fn recency_weight(days_until: i64) -> f64 {
    ((RECENCY_HORIZON_DAYS - days_until as f64) / RECENCY_HORIZON_DAYS).max(0.0)
}

/// Unnormalized sum of severity × recency over all events.
pub fn raw_event_impact(events: &[CalendarEvent], today: NaiveDate) -> f64 {
    events
        .iter()
        .map(|e| e.impact.severity() * recency_weight(e.days_until(today)))
        .sum()
}

pub fn score_event_impact(events: &[CalendarEvent], today: NaiveDate) -> EventImpactScore {
    EventImpactScore::new(raw_event_impact(events, today) / IMPACT_NORMALIZER)
}
