//! VWAP (Volume-Weighted Average Price)
//!
//! sum(volume * typical price) / sum(volume), typical = (high + low + close) / 3.

use serde::{Deserialize, Serialize};

use crate::models::indicators::Candle;

/// Which candles contribute to each VWAP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "period")]
pub enum VwapWindow {
    /// From the first supplied candle up to the current one.
    #[default]
    Cumulative,
    /// The last `n` candles; absent until `n` exist.
    Rolling(usize),
}

pub fn calculate_vwap(candles: &[Candle], window: VwapWindow) -> Vec<Option<f64>> {
    let pv: Vec<f64> = candles.iter().map(|c| c.volume * c.typical_price()).collect();
    let vol: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    match window {
        VwapWindow::Cumulative => {
            let mut sum_pv = 0.0;
            let mut sum_vol = 0.0;
            pv.iter()
                .zip(&vol)
                .map(|(p, v)| {
                    sum_pv += p;
                    sum_vol += v;
                    ratio(sum_pv, sum_vol)
                })
                .collect()
        }
        VwapWindow::Rolling(n) => {
            let mut out = vec![None; candles.len()];
            if n == 0 || candles.len() < n {
                return out;
            }
            for end in n..=candles.len() {
                let sum_pv: f64 = pv[end - n..end].iter().sum();
                let sum_vol: f64 = vol[end - n..end].iter().sum();
                out[end - 1] = ratio(sum_pv, sum_vol);
            }
            out
        }
    }
}

fn ratio(pv: f64, vol: f64) -> Option<f64> {
    if vol > 0.0 {
        Some(pv / vol)
    } else {
        None
    }
}
