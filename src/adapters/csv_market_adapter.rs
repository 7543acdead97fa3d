//! CSV candle file adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with a header row:
//! `open_time,open,high,low,close,volume`. `open_time` may be unix seconds,
//! unix milliseconds, RFC 3339 or a plain `YYYY-MM-DD` date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::VolscanError;
use crate::ports::market_data_port::MarketDataPort;

/// Epoch values above this are taken as milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

#[derive(Debug, Deserialize)]
struct CandleRow {
    open_time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub struct CsvMarketAdapter {
    base_path: PathBuf,
}

impl CsvMarketAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

pub fn parse_open_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(epoch) = raw.parse::<i64>() {
        return if epoch.abs() > MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl MarketDataPort for CsvMarketAdapter {
    fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, VolscanError> {
        let path = self.csv_path(symbol);
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| VolscanError::DataSource {
                reason: format!("failed to read {}: {}", path.display(), e),
            })?;

        let mut candles = Vec::new();
        for (line, result) in rdr.deserialize::<CandleRow>().enumerate() {
            let row = result.map_err(|e| VolscanError::MalformedInput {
                reason: format!("{} row {}: {}", path.display(), line + 1, e),
            })?;
            let open_time =
                parse_open_time(&row.open_time).ok_or_else(|| VolscanError::MalformedInput {
                    reason: format!(
                        "{} row {}: invalid open_time '{}'",
                        path.display(),
                        line + 1,
                        row.open_time
                    ),
                })?;
            candles.push(Candle {
                open_time,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        candles.sort_by_key(|c| c.open_time);
        let skip = candles.len().saturating_sub(limit);
        Ok(candles.split_off(skip))
    }
}
