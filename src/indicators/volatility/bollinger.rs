//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * standard deviation)
//! Lower Band = Middle - (std_dev * standard deviation)

use crate::common::math::{self, StdDevConvention};
use crate::models::indicators::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
    convention: StdDevConvention,
) -> Vec<Option<BollingerBands>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period {
        return out;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    for end in period..=closes.len() {
        let window = &closes[end - period..end];
        let bands = math::mean(window).and_then(|middle| {
            let std = math::standard_deviation(window, convention)?;
            Some(BollingerBands {
                upper: middle + std_dev * std,
                middle,
                lower: middle - std_dev * std,
            })
        });
        out[end - 1] = bands;
    }
    out
}
