//! EMA (Exponential Moving Average) indicator
//!
//! Seeded with the SMA of the first `period` closes, then
//! EMA[i] = close[i] * k + EMA[i-1] * (1 - k), k = 2 / (period + 1).

use crate::common::math;
use crate::models::indicators::Candle;

/// EMA of closes, one slot per candle.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema_series(&closes, period)
}

/// EMA value at the last candle.
pub fn latest_ema(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_ema(candles, period).last().copied().flatten()
}
