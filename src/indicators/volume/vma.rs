//! Volume moving average

use crate::common::math;
use crate::models::indicators::Candle;

pub fn calculate_vma(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    math::sma_series(&volumes, period)
}
