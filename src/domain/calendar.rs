//! Macroeconomic calendar events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Impact {
    High,
    Medium,
    Low,
    /// Any label the provider sends that we do not grade.
    Unknown(String),
}

impl Impact {
    /// Severity weight used by the event impact score.
    pub fn severity(&self) -> f64 {
        match self {
            Impact::High => 1.0,
            Impact::Medium => 0.5,
            Impact::Low => 0.25,
            Impact::Unknown(_) => 0.0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
            Impact::Unknown(raw) => raw,
        }
    }
}

impl FromStr for Impact {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "high" => Impact::High,
            "medium" => Impact::Medium,
            "low" => Impact::Low,
            _ => Impact::Unknown(s.trim().to_string()),
        })
    }
}

impl From<String> for Impact {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(impact) => impact,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Impact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    /// Time of day as published, e.g. "13:30". Display only.
    pub time: String,
    pub event: String,
    pub country: String,
    pub impact: Impact,
    pub forecast: String,
    pub previous: String,
    pub actual: String,
}

impl CalendarEvent {
    /// Whole days from `today` to the event; negative for past events.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// Display order: by date, then by published time of day.
pub fn sort_chronologically(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
}
