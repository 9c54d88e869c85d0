//! Trend direction of a series relative to its own EMA.

use crate::indicators::trend::ema::latest_ema;
use crate::models::indicators::Candle;
use crate::models::market::{TrendDirection, TrendReading};

/// Classify the last close against EMA(`period`).
///
/// Closes within `flat_band_pct` percent of the EMA are `Flat`. Absent when
/// the series is shorter than the EMA period.
pub fn derive_trend(candles: &[Candle], period: usize, flat_band_pct: f64) -> Option<TrendReading> {
    let ema = latest_ema(candles, period)?;
    let close = candles.last()?.close;
    let band = ema.abs() * flat_band_pct / 100.0;

    let direction = if close > ema + band {
        TrendDirection::Up
    } else if close < ema - band {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    Some(TrendReading {
        direction,
        ema,
        close,
    })
}
