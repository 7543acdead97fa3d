//! Bollinger Band Width.
//!
//! Over the trailing `period` closes:
//! - Middle: Simple Moving Average (SMA)
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the sample standard deviation (divides by N-1).
//! BBW = (Upper - Lower) / Middle, evaluated at the last close.

use crate::domain::candle::{closes, Candle};
use crate::domain::indicator::IndicatorReading;
use crate::domain::indicator_helpers::{mean, sample_stddev, trailing};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn width(&self) -> Option<f64> {
        if self.middle == 0.0 {
            return None;
        }
        Some((self.upper - self.lower) / self.middle)
    }
}

pub fn bollinger_bands(
    candles: &[Candle],
    period: usize,
    multiplier: f64,
) -> Option<BollingerBands> {
    let all = closes(candles);
    let window = trailing(&all, period)?;
    let middle = mean(window)?;
    let std = sample_stddev(window)?;
    Some(BollingerBands {
        upper: middle + multiplier * std,
        middle,
        lower: middle - multiplier * std,
    })
}

pub fn bollinger_band_width(
    candles: &[Candle],
    period: usize,
    multiplier: f64,
) -> IndicatorReading {
    match bollinger_bands(candles, period, multiplier).and_then(|b| b.width()) {
        Some(width) => IndicatorReading::Calculated(width),
        None => IndicatorReading::Insufficient {
            have: candles.len(),
            need: period,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_candles;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_constant_values() {
        let candles = make_candles(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let bands = bollinger_bands(&candles, 3, 2.0).unwrap();

        assert_relative_eq!(bands.middle, 100.0);
        assert_relative_eq!(bands.upper, 100.0);
        assert_relative_eq!(bands.lower, 100.0);
        assert_relative_eq!(bollinger_band_width(&candles, 3, 2.0).or_zero(), 0.0);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let candles = make_candles(&[10.0, 20.0, 30.0]);
        let bands = bollinger_bands(&candles, 3, 2.0).unwrap();

        // sample stddev of 10, 20, 30 is 10
        assert_relative_eq!(bands.middle, 20.0, epsilon = 1e-10);
        assert_relative_eq!(bands.upper, 40.0, epsilon = 1e-10);
        assert_relative_eq!(bands.lower, 0.0, epsilon = 1e-10);
        assert_relative_eq!(
            bollinger_band_width(&candles, 3, 2.0).or_zero(),
            2.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn bollinger_width_scales_with_multiplier() {
        let candles = make_candles(&[10.0, 20.0, 30.0]);
        let narrow = bollinger_band_width(&candles, 3, 1.0).or_zero();
        let wide = bollinger_band_width(&candles, 3, 2.0).or_zero();
        assert_relative_eq!(wide, 2.0 * narrow, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_uses_trailing_closes() {
        let candles = make_candles(&[1.0, 500.0, 10.0, 20.0, 30.0]);
        let bands = bollinger_bands(&candles, 3, 2.0).unwrap();
        assert_relative_eq!(bands.middle, 20.0, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_symmetry() {
        let candles = make_candles(&[12.0, 17.0, 31.0, 8.0]);
        let bands = bollinger_bands(&candles, 4, 2.0).unwrap();
        let upper_dist = bands.upper - bands.middle;
        let lower_dist = bands.middle - bands.lower;
        assert_relative_eq!(upper_dist, lower_dist, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_insufficient_history() {
        let candles = make_candles(&[10.0, 20.0]);
        assert_eq!(
            bollinger_band_width(&candles, 3, 2.0),
            IndicatorReading::Insufficient { have: 2, need: 3 }
        );
    }

    #[test]
    fn bollinger_defined_at_exact_period() {
        let candles = make_candles(&[10.0; 14]);
        assert!(bollinger_band_width(&candles, 14, 2.0).is_calculated());
    }
}
