//! Spreadsheet-style CSV report.
//!
//! Two sheets: the trading sheet at `output_path`, one row per analyzed
//! asset, and an events sheet next to it named `<stem>-events.csv`.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::calendar::CalendarEvent;
use crate::domain::error::VolscanError;
use crate::domain::report::{AssetReport, Report};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct TradingRow<'a> {
    date: String,
    pair: &'a str,
    price: f64,
    historical_volatility: Option<f64>,
    atr: Option<f64>,
    bbw: Option<f64>,
    volatility_score: f64,
    action: &'static str,
    risk_level: &'static str,
    strategy: &'a str,
}

impl<'a> TradingRow<'a> {
    fn from_asset(report: &Report, asset: &'a AssetReport) -> Self {
        Self {
            date: report.run_date.format("%Y-%m-%d").to_string(),
            pair: &asset.symbol,
            price: asset.price,
            historical_volatility: asset.indicators.hv.value(),
            atr: asset.indicators.atr.value(),
            bbw: asset.indicators.bbw.value(),
            volatility_score: asset.volatility_score.value(),
            action: asset.recommendation.action.label(),
            risk_level: asset.recommendation.risk_level.label(),
            strategy: &asset.recommendation.strategy,
        }
    }
}

#[derive(Debug, Serialize)]
struct EventRow<'a> {
    date: String,
    time: &'a str,
    event: &'a str,
    country: &'a str,
    impact: &'a str,
    forecast: &'a str,
    previous: &'a str,
    actual: &'a str,
}

impl<'a> From<&'a CalendarEvent> for EventRow<'a> {
    fn from(e: &'a CalendarEvent) -> Self {
        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            time: &e.time,
            event: &e.event,
            country: &e.country,
            impact: e.impact.label(),
            forecast: &e.forecast,
            previous: &e.previous,
            actual: &e.actual,
        }
    }
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn events_path(output_path: &Path) -> PathBuf {
        let stem = output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        output_path.with_file_name(format!("{}-events.csv", stem))
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(path: &Path, e: csv::Error) -> VolscanError {
    VolscanError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

fn write_rows<T: Serialize>(
    path: &Path,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), VolscanError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| csv_error(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &Report, output_path: &str) -> Result<(), VolscanError> {
        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        write_rows(
            path,
            report.assets.values().map(|a| TradingRow::from_asset(report, a)),
        )?;
        write_rows(
            &Self::events_path(path),
            report.events.iter().map(EventRow::from),
        )?;
        Ok(())
    }
}
