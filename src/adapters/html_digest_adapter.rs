//! Daily HTML digest implementing NotificationPort.
//!
//! Sections, in order: upcoming events (top N), volatility forecast, market
//! insights and risk assessment. The digest is written to a file; delivery is
//! left to whatever picks it up.

use askama::Template;
use std::fs;
use std::path::Path;

use crate::domain::calendar::{CalendarEvent, Impact};
use crate::domain::error::VolscanError;
use crate::domain::report::{AssetReport, Report, RunSummary};
use crate::ports::notification_port::NotificationPort;

#[derive(Template)]
#[template(path = "digest.html")]
struct DigestTemplate<'a> {
    subject: String,
    events: Vec<EventRow<'a>>,
    assets: Vec<AssetRow<'a>>,
    skipped: Vec<SkippedRow<'a>>,
    regime_insight: Option<&'static str>,
    multiple_high_impact: bool,
    most_volatile: Option<AssetRow<'a>>,
    nearest_event: Option<EventRow<'a>>,
}

struct EventRow<'a> {
    date: chrono::NaiveDate,
    time: &'a str,
    event: &'a str,
    country: &'a str,
    impact: &'a str,
    class: &'static str,
}

impl<'a> EventRow<'a> {
    fn new(event: &'a CalendarEvent) -> Self {
        Self {
            date: event.date,
            time: &event.time,
            event: &event.event,
            country: &event.country,
            impact: event.impact.label(),
            class: impact_class(&event.impact),
        }
    }
}

struct AssetRow<'a> {
    symbol: &'a str,
    price: String,
    score: String,
    action: String,
    risk: String,
}

impl<'a> AssetRow<'a> {
    fn new(asset: &'a AssetReport) -> Self {
        Self {
            symbol: &asset.symbol,
            price: format!("{:.2}", asset.price),
            score: format!("{:.2}", asset.volatility_score.value()),
            action: asset.recommendation.action.to_string(),
            risk: asset.recommendation.risk_level.to_string(),
        }
    }
}

struct SkippedRow<'a> {
    symbol: &'a str,
    reason: String,
}

pub struct HtmlDigestAdapter;

impl HtmlDigestAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn subject(summary: &RunSummary<'_>) -> String {
        format!("Crypto Trading Recommendations - {}", summary.run_date)
    }

    pub fn render(report: &Report, summary: &RunSummary<'_>) -> Result<String, VolscanError> {
        let template = DigestTemplate {
            subject: Self::subject(summary),
            events: summary.top_events.iter().map(EventRow::new).collect(),
            assets: report.assets.values().map(AssetRow::new).collect(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedRow {
                    symbol: &s.symbol,
                    reason: s.reason.to_string(),
                })
                .collect(),
            regime_insight: summary.regime.map(|r| r.insight()),
            multiple_high_impact: summary.multiple_high_impact_events(),
            most_volatile: summary.most_volatile.map(AssetRow::new),
            nearest_event: summary.nearest_event.map(EventRow::new),
        };

        template.render().map_err(|e| VolscanError::Report {
            reason: format!("failed to render digest: {}", e),
        })
    }
}

impl Default for HtmlDigestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPort for HtmlDigestAdapter {
    fn notify(
        &self,
        report: &Report,
        summary: &RunSummary<'_>,
        output_path: &str,
    ) -> Result<(), VolscanError> {
        let html = Self::render(report, summary)?;
        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        Ok(())
    }
}

fn impact_class(impact: &Impact) -> &'static str {
    match impact {
        Impact::High => "event-high",
        Impact::Medium => "event-medium",
        Impact::Low => "event-low",
        Impact::Unknown(_) => "event-unknown",
    }
}
