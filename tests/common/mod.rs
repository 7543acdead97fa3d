#![allow(dead_code)]

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use volscan::domain::calendar::{CalendarEvent, Impact};
use volscan::domain::candle::Candle;
use volscan::domain::error::VolscanError;
use volscan::ports::calendar_port::CalendarPort;
use volscan::ports::market_data_port::MarketDataPort;

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

pub struct MockMarketData {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, VolscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(VolscanError::DataSource {
                reason: reason.clone(),
            });
        }
        let candles = self.data.get(symbol).cloned().unwrap_or_default();
        let skip = candles.len().saturating_sub(limit);
        Ok(candles[skip..].to_vec())
    }
}

pub struct MockCalendar {
    pub events: Vec<CalendarEvent>,
    pub fail: bool,
}

impl MockCalendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            events: Vec::new(),
            fail: true,
        }
    }
}

impl CalendarPort for MockCalendar {
    fn fetch_events(
        &self,
        _today: NaiveDate,
        _days_ahead: u32,
    ) -> Result<Vec<CalendarEvent>, VolscanError> {
        if self.fail {
            return Err(VolscanError::DataSource {
                reason: "calendar provider unavailable".into(),
            });
        }
        Ok(self.events.clone())
    }
}

/// Daily candles ending on the run date, one per (high, low, close).
pub fn make_ohlc(rows: &[(f64, f64, f64)]) -> Vec<Candle> {
    let last = rows.len().saturating_sub(1) as i64;
    let end = Utc.from_utc_datetime(&run_date().and_hms_opt(0, 0, 0).unwrap());
    rows.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| Candle {
            open_time: end - Duration::days(last - i as i64),
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Candles with high == low == close.
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    let rows: Vec<_> = closes.iter().map(|&c| (c, c, c)).collect();
    make_ohlc(&rows)
}

pub fn event(days_ahead: i64, name: &str, impact: Impact) -> CalendarEvent {
    CalendarEvent {
        date: run_date() + Duration::days(days_ahead),
        time: "12:00".into(),
        event: name.into(),
        country: "United States".into(),
        impact,
        forecast: String::new(),
        previous: String::new(),
        actual: String::new(),
    }
}
