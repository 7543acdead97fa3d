//! Deterministic demo data for running without market or calendar files.
//!
//! Each known symbol gets a synthetic daily series that oscillates around its
//! reference price and ends exactly on it. The calendar is the fixed set of
//! five macro releases placed relative to the run date.

use chrono::{Duration, NaiveDate};

use crate::domain::analysis::MAX_HISTORY_LIMIT;
use crate::domain::calendar::{CalendarEvent, Impact};
use crate::domain::candle::Candle;
use crate::domain::error::VolscanError;
use crate::ports::calendar_port::CalendarPort;
use crate::ports::market_data_port::MarketDataPort;

struct DemoAsset {
    symbol: &'static str,
    price: f64,
    /// Relative daily swing of the synthetic series.
    swing: f64,
    phase: f64,
}

const DEMO_ASSETS: [DemoAsset; 5] = [
    DemoAsset { symbol: "BTCUSDT", price: 62430.45, swing: 0.030, phase: 0.0 },
    DemoAsset { symbol: "ETHUSDT", price: 3785.22, swing: 0.040, phase: 0.7 },
    DemoAsset { symbol: "SOLUSDT", price: 148.75, swing: 0.065, phase: 1.3 },
    DemoAsset { symbol: "XRPUSDT", price: 0.59, swing: 0.050, phase: 2.1 },
    DemoAsset { symbol: "BNBUSDT", price: 585.35, swing: 0.020, phase: 2.9 },
];

/// Radians advanced per candle.
const CYCLE_STEP: f64 = 0.9;

/// (days ahead, time, event, country, impact, forecast, previous)
type DemoEvent = (
    i64,
    &'static str,
    &'static str,
    &'static str,
    Impact,
    &'static str,
    &'static str,
);

const DEMO_EVENTS: [DemoEvent; 5] = [
    (1, "18:00", "FOMC Meeting Minutes", "United States", Impact::High, "N/A", "N/A"),
    (2, "12:45", "ECB Interest Rate Decision", "Eurozone", Impact::High, "3.75%", "3.75%"),
    (3, "13:30", "US Nonfarm Payrolls", "United States", Impact::High, "180K", "175K"),
    (1, "00:50", "Japan GDP Growth Rate QoQ", "Japan", Impact::Medium, "0.4%", "0.3%"),
    (4, "01:30", "China Manufacturing PMI", "China", Impact::Medium, "50.3", "50.1"),
];

pub struct DemoAdapter {
    today: NaiveDate,
}

impl DemoAdapter {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn reference_price(symbol: &str) -> Option<f64> {
        DEMO_ASSETS.iter().find(|a| a.symbol == symbol).map(|a| a.price)
    }

    fn series(&self, asset: &DemoAsset, limit: usize) -> Vec<Candle> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        let shape = |i: usize| 1.0 + asset.swing * (CYCLE_STEP * i as f64 + asset.phase).sin();
        let last = limit.saturating_sub(1);
        let scale = asset.price / shape(last);

        let mut candles = Vec::with_capacity(limit);
        let mut prev_close = None;
        for i in 0..limit {
            // Last close is pinned to the reference price.
            let close = if i == last { asset.price } else { scale * shape(i) };
            let open = prev_close.unwrap_or(close);
            let half_range = close * asset.swing / 2.0;
            let Some(open_time) = self
                .today
                .checked_sub_signed(Duration::days((last - i) as i64))
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
            else {
                continue;
            };
            candles.push(Candle {
                open_time,
                open,
                high: open.max(close) + half_range,
                low: open.min(close) - half_range,
                close,
                volume: 1_000.0 + 100.0 * i as f64,
            });
            prev_close = Some(close);
        }
        candles
    }
}

impl MarketDataPort for DemoAdapter {
    /// Unknown symbols have no demo series and come back empty.
    fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, VolscanError> {
        Ok(DEMO_ASSETS
            .iter()
            .find(|a| a.symbol == symbol)
            .map(|asset| self.series(asset, limit))
            .unwrap_or_default())
    }
}

impl CalendarPort for DemoAdapter {
    fn fetch_events(
        &self,
        today: NaiveDate,
        days_ahead: u32,
    ) -> Result<Vec<CalendarEvent>, VolscanError> {
        let horizon_end = today + Duration::days(i64::from(days_ahead));
        Ok(DEMO_EVENTS
            .iter()
            .map(|(days, time, event, country, impact, forecast, previous)| CalendarEvent {
                date: today + Duration::days(*days),
                time: time.to_string(),
                event: event.to_string(),
                country: country.to_string(),
                impact: impact.clone(),
                forecast: forecast.to_string(),
                previous: previous.to_string(),
                actual: String::new(),
            })
            .filter(|e| e.date <= horizon_end)
            .collect())
    }
}
