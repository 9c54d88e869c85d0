//! Stochastic oscillator
//!
//! %K = 100 * (close - lowest low) / (highest high - lowest low) over `k_period`
//! %D = SMA(%K) over `d_period`

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::indicators::Candle;

/// %K when the high-low range of the window is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRangePolicy {
    /// %K = 50
    #[default]
    Neutral,
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn calculate_stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
    policy: ZeroRangePolicy,
) -> StochasticSeries {
    let mut k = vec![None; candles.len()];
    if k_period > 0 && candles.len() >= k_period {
        for end in k_period..=candles.len() {
            let window = &candles[end - k_period..end];
            let lowest = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let highest = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            let range = highest - lowest;
            let close = candles[end - 1].close;

            k[end - 1] = if range > 0.0 {
                Some(100.0 * (close - lowest) / range)
            } else {
                match policy {
                    ZeroRangePolicy::Neutral => Some(50.0),
                    ZeroRangePolicy::Absent => None,
                }
            };
        }
    }

    let d = math::sma_series_opt(&k, d_period);
    StochasticSeries { k, d }
}
