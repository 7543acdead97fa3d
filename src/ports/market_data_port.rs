//! Market data port trait.

use crate::domain::candle::Candle;
use crate::domain::error::VolscanError;

pub trait MarketDataPort: Sync {
    /// Up to `limit` most recent daily candles, oldest first. A source with
    /// less history returns fewer candles rather than failing.
    fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, VolscanError>;
}
