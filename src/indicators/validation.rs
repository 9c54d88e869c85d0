//! Fail-fast checks on raw candle input.
//!
//! Ordering is the caller's responsibility and is not verified here.

use crate::indicators::error::IndicatorError;
use crate::models::indicators::Candle;

pub fn validate_candle(index: usize, candle: &Candle) -> Result<(), IndicatorError> {
    let fields = [
        ("open", candle.open),
        ("high", candle.high),
        ("low", candle.low),
        ("close", candle.close),
        ("volume", candle.volume),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(IndicatorError::NonFinite {
                index,
                field,
                value,
            });
        }
    }
    Ok(())
}

pub fn validate_candles(candles: &[Candle]) -> Result<(), IndicatorError> {
    candles
        .iter()
        .enumerate()
        .try_for_each(|(i, c)| validate_candle(i, c))
}
