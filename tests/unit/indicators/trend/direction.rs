//! Unit tests for trend direction derivation

use perpadvisor::indicators::trend::derive_trend;
use perpadvisor::models::indicators::Candle;
use perpadvisor::models::market::TrendDirection;

fn candles_from(closes: impl Iterator<Item = f64>) -> Vec<Candle> {
    closes
        .enumerate()
        .map(|(i, c)| Candle::new(c, c + 1.0, c - 1.0, c, 500.0, i as i64 * 86_400_000))
        .collect()
}

#[test]
fn test_rising_series_is_up() {
    let candles = candles_from((0..30).map(|i| 100.0 + i as f64));
    let reading = derive_trend(&candles, 20, 0.1).unwrap();
    assert_eq!(reading.direction, TrendDirection::Up);
    assert!(reading.close > reading.ema);
    assert_eq!(reading.close, 129.0);
}

#[test]
fn test_falling_series_is_down() {
    let candles = candles_from((0..30).map(|i| 200.0 - i as f64));
    let reading = derive_trend(&candles, 20, 0.1).unwrap();
    assert_eq!(reading.direction, TrendDirection::Down);
}

#[test]
fn test_constant_series_is_flat() {
    let candles = candles_from((0..30).map(|_| 100.0));
    let reading = derive_trend(&candles, 20, 0.1).unwrap();
    assert_eq!(reading.direction, TrendDirection::Flat);
    assert!((reading.ema - 100.0).abs() < 1e-12);
}

#[test]
fn test_short_series_has_no_trend() {
    let candles = candles_from((0..10).map(|i| 100.0 + i as f64));
    assert!(derive_trend(&candles, 20, 0.1).is_none());
}
