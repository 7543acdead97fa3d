//! CSV economic calendar adapter.
//!
//! Header row: `date,time,event,country,impact,forecast,previous,actual`.
//! Only `date`, `event` and `impact` are required. Rows that fail to parse
//! are logged and dropped; the rest of the calendar is still used.

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::calendar::CalendarEvent;
use crate::domain::error::VolscanError;
use crate::ports::calendar_port::CalendarPort;

#[derive(Debug, Deserialize)]
struct EventRow {
    date: String,
    #[serde(default)]
    time: String,
    event: String,
    #[serde(default)]
    country: String,
    impact: String,
    #[serde(default)]
    forecast: String,
    #[serde(default)]
    previous: String,
    #[serde(default)]
    actual: String,
}

pub struct CsvCalendarAdapter {
    path: PathBuf,
}

impl CsvCalendarAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CalendarPort for CsvCalendarAdapter {
    fn fetch_events(
        &self,
        today: NaiveDate,
        days_ahead: u32,
    ) -> Result<Vec<CalendarEvent>, VolscanError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| VolscanError::DataSource {
                reason: format!("failed to read {}: {}", self.path.display(), e),
            })?;

        let horizon_end = today + Duration::days(i64::from(days_ahead));
        let mut events = Vec::new();

        for (line, result) in rdr.deserialize::<EventRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("skipping calendar row {}: {}", line + 1, e);
                    continue;
                }
            };
            let date = match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    warn!(
                        "skipping calendar row {} ({}): invalid date '{}': {}",
                        line + 1,
                        row.event,
                        row.date,
                        e
                    );
                    continue;
                }
            };
            if date < today || date > horizon_end {
                continue;
            }
            events.push(CalendarEvent {
                date,
                time: row.time,
                event: row.event,
                country: row.country,
                impact: row.impact.into(),
                forecast: row.forecast,
                previous: row.previous,
                actual: row.actual,
            });
        }

        Ok(events)
    }
}
