//! Windowed statistics shared by the indicator implementations.
//!
//! Series helpers return one slot per input value; `None` marks positions
//! where the window does not have enough history yet.

use serde::{Deserialize, Serialize};

/// Divisor used when computing a windowed standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevConvention {
    /// Divide by the window length.
    #[default]
    Population,
    /// Divide by the window length minus one.
    Sample,
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation of `values` under the given convention.
pub fn standard_deviation(values: &[f64], convention: StdDevConvention) -> Option<f64> {
    let avg = mean(values)?;
    let divisor = match convention {
        StdDevConvention::Population => values.len(),
        StdDevConvention::Sample => values.len().checked_sub(1)?,
    };
    if divisor == 0 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / divisor as f64).sqrt())
}

/// Simple moving average over a trailing window, one slot per input.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for end in period..=values.len() {
        out[end - 1] = mean(&values[end - period..end]);
    }
    out
}

/// Simple moving average over a series that may itself contain gaps.
///
/// A window containing any absent value yields absent.
pub fn sma_series_opt(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for end in period..=values.len() {
        let window: Option<Vec<f64>> = values[end - period..end].iter().copied().collect();
        out[end - 1] = window.and_then(|w| mean(&w));
    }
    out
}

/// One step of the EMA recursion.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// Exponential moving average seeded with the SMA of the first `period` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    out[period - 1] = mean(&values[..period]);
    for i in period..values.len() {
        out[i] = out[i - 1].map(|prev| ema_from_previous(values[i], prev, period));
    }
    out
}

/// Percentage change from `from` to `to`; `None` when `from` is zero.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}
