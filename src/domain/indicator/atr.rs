//! Average True Range, normalized by price.
//!
//! TR is defined from the second candle on (it needs a previous close).
//! ATR = simple mean of the trailing `window` TR values; the output is
//! ATR / last close. Needs `window + 1` candles.

use crate::domain::candle::Candle;
use crate::domain::indicator::IndicatorReading;
use crate::domain::indicator_helpers::{mean, trailing};

pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|w| w[1].true_range(w[0].close))
        .collect()
}

pub fn normalized_atr(candles: &[Candle], window: usize) -> IndicatorReading {
    let insufficient = IndicatorReading::Insufficient {
        have: candles.len(),
        need: window + 1,
    };

    let ranges = true_ranges(candles);
    let (Some(recent), Some(last)) = (trailing(&ranges, window), candles.last()) else {
        return insufficient;
    };
    match mean(recent) {
        Some(atr) if last.close > 0.0 => IndicatorReading::Calculated(atr / last.close),
        _ => insufficient,
    }
}
