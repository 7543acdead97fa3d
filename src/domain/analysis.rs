//! Per-asset analysis and the run pipeline.
//!
//! The event impact is scored once per run and handed read-only to every
//! asset. Assets are evaluated independently on scoped threads and gathered
//! into the report; a failing asset is recorded as skipped and the run goes
//! on.

use chrono::NaiveDate;
use std::thread;
use tracing::{debug, info, warn};

use crate::domain::candle::{last_close, Candle};
use crate::domain::error::{AnalysisError, VolscanError};
use crate::domain::event_impact::{score_event_impact, EventImpactScore};
use crate::domain::indicator::{IndicatorParams, IndicatorSet};
use crate::domain::recommendation::classify;
use crate::domain::report::{AssetReport, Report, SkipReason};
use crate::domain::score::{final_score, ScoreBreakdown, VolatilityWeights};
use crate::ports::calendar_port::CalendarPort;
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
/// Largest candle request per symbol, matching the exchange kline cap.
pub const MAX_HISTORY_LIMIT: usize = 1000;
pub const DEFAULT_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_TOP_EVENTS: usize = 5;
pub const DEFAULT_SYMBOLS: [&str; 5] = ["BTCUSDT", "ETHUSDT", "SOLUSDT", "XRPUSDT", "BNBUSDT"];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub params: IndicatorParams,
    pub weights: VolatilityWeights,
    /// Candles requested per symbol.
    pub history_limit: usize,
    /// Calendar look-ahead in days.
    pub horizon_days: u32,
    pub top_events: usize,
    pub symbols: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            params: IndicatorParams::default(),
            weights: VolatilityWeights::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            horizon_days: DEFAULT_HORIZON_DAYS,
            top_events: DEFAULT_TOP_EVENTS,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn analyze_asset(
    symbol: &str,
    candles: &[Candle],
    event_impact: EventImpactScore,
    config: &AnalysisConfig,
) -> Result<AssetReport, AnalysisError> {
    let Some(price) = last_close(candles) else {
        return Err(AnalysisError::EmptyAssetResult {
            symbol: symbol.to_string(),
        });
    };
    for (index, candle) in candles.iter().enumerate() {
        candle
            .validate()
            .map_err(|reason| AnalysisError::MalformedInput {
                symbol: symbol.to_string(),
                index,
                reason,
            })?;
    }

    let indicators = IndicatorSet::compute(candles, &config.params);
    let breakdown = ScoreBreakdown::compute(&indicators, &config.weights);
    let volatility_score = final_score(breakdown.partial_score, event_impact, &config.weights);
    let recommendation = classify(volatility_score, event_impact);

    debug!(
        symbol,
        candles = candles.len(),
        hv = %indicators.hv,
        atr = %indicators.atr,
        bbw = %indicators.bbw,
        partial = breakdown.partial_score,
        score = volatility_score.value(),
        action = %recommendation.action,
        "asset analyzed"
    );

    Ok(AssetReport {
        symbol: symbol.to_string(),
        price,
        candles: candles.len(),
        indicators,
        breakdown,
        volatility_score,
        recommendation,
    })
}

fn evaluate_symbol(
    market: &dyn MarketDataPort,
    symbol: &str,
    event_impact: EventImpactScore,
    config: &AnalysisConfig,
) -> Result<AssetReport, SkipReason> {
    let candles = market
        .fetch_candles(symbol, config.history_limit)
        .map_err(|e| match e {
            VolscanError::MalformedInput { reason } => SkipReason::MalformedInput { reason },
            VolscanError::DataSource { reason } => SkipReason::DataSource { reason },
            other => SkipReason::DataSource {
                reason: other.to_string(),
            },
        })?;
    analyze_asset(symbol, &candles, event_impact, config).map_err(|e| match e {
        AnalysisError::EmptyAssetResult { .. } => SkipReason::NoData,
        AnalysisError::MalformedInput { .. } => SkipReason::MalformedInput {
            reason: e.to_string(),
        },
    })
}

pub fn run_analysis(
    market: &dyn MarketDataPort,
    calendar: &dyn CalendarPort,
    config: &AnalysisConfig,
    today: NaiveDate,
) -> Report {
    info!(
        date = %today,
        symbols = config.symbols.len(),
        horizon_days = config.horizon_days,
        "starting volatility analysis"
    );

    let events = match calendar.fetch_events(today, config.horizon_days) {
        Ok(events) => events,
        Err(e) => {
            warn!("calendar unavailable, scoring without events: {e}");
            Vec::new()
        }
    };
    let event_impact = score_event_impact(&events, today);
    info!(events = events.len(), event_impact = event_impact.value(), "event impact scored");

    let mut report = Report::new(today, event_impact, events);

    let outcomes: Vec<(&String, Result<AssetReport, SkipReason>)> = thread::scope(|scope| {
        let handles: Vec<_> = config
            .symbols
            .iter()
            .map(|symbol| {
                let handle =
                    scope.spawn(move || evaluate_symbol(market, symbol, event_impact, config));
                (symbol, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(symbol, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(SkipReason::DataSource {
                        reason: "analysis worker panicked".to_string(),
                    })
                });
                (symbol, outcome)
            })
            .collect()
    });

    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(asset) => {
                info!(
                    symbol = %asset.symbol,
                    score = asset.volatility_score.value(),
                    action = %asset.recommendation.action,
                    "recommendation ready"
                );
                report.insert(asset);
            }
            Err(reason) => {
                warn!("skipping {symbol} ({reason})");
                report.skip(symbol.clone(), reason);
            }
        }
    }

    if !report.skipped.is_empty() {
        info!(
            "analyzed {} of {} symbols",
            report.assets.len(),
            config.symbols.len()
        );
    }
    report
}
