//! ATR (Average True Range) indicator
//!
//! The first candle has no previous close and therefore no true range, so
//! ATR(period) is first available at index `period`.

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::indicators::Candle;

/// How true ranges are averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtrSmoothing {
    /// Simple average of the last `period` true ranges.
    #[default]
    Simple,
    /// Wilder's smoothing seeded with the simple average of the first `period` true ranges.
    Wilder,
}

pub fn calculate_atr(candles: &[Candle], period: usize, smoothing: AtrSmoothing) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    // tr[j] belongs to candle j + 1
    let tr: Vec<f64> = candles
        .windows(2)
        .map(|w| math::true_range(w[1].high, w[1].low, w[0].close))
        .collect();

    match smoothing {
        AtrSmoothing::Simple => {
            for (j, value) in math::sma_series(&tr, period).into_iter().enumerate() {
                out[j + 1] = value;
            }
        }
        AtrSmoothing::Wilder => {
            let mut prev = match math::mean(&tr[..period]) {
                Some(seed) => seed,
                None => return out,
            };
            out[period] = Some(prev);
            for j in period..tr.len() {
                prev = (prev * (period as f64 - 1.0) + tr[j]) / period as f64;
                out[j + 1] = Some(prev);
            }
        }
    }
    out
}
