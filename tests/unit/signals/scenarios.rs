//! Market scenario tests through the full evaluation pipeline

use perpadvisor::config::EngineConfig;
use perpadvisor::indicators::trend::derive_trend;
use perpadvisor::models::indicators::Candle;
use perpadvisor::models::market::{MarketContext, TrendDirection};
use perpadvisor::models::position::{PositionInfo, PositionSide};
use perpadvisor::models::recommendation::Action;
use perpadvisor::models::snapshot::{Evaluation, MarketSnapshot};
use perpadvisor::signals::engine::SignalEngine;

fn create_uptrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.5);
            Candle::new(base, base + 1.0, base - 0.5, base + 0.5, 1000.0 + (i as f64 * 10.0), i as i64 * 300_000)
        })
        .collect()
}

fn create_downtrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 200.0 - (i as f64 * 0.5);
            Candle::new(base, base + 0.5, base - 1.0, base - 0.5, 1000.0 + (i as f64 * 10.0), i as i64 * 300_000)
        })
        .collect()
}

fn create_ranging_candles(count: usize, min: f64, max: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let cycle = (i as f64 % 20.0) / 20.0;
            let price = min + (max - min) * cycle;
            Candle::new(price, price + 0.1, price - 0.1, price, 1000.0, i as i64 * 300_000)
        })
        .collect()
}

fn create_volatile_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.1);
            let volatility = ((i as f64 % 5.0) - 2.5) * 2.0;
            Candle::new(
                base,
                base + volatility.abs() + 0.5,
                base - volatility.abs() - 0.5,
                base + volatility,
                1000.0 + (i as f64 * 50.0),
                i as i64 * 300_000,
            )
        })
        .collect()
}

fn create_reversal_candles(count: usize) -> Vec<Candle> {
    let midpoint = count / 2;
    (0..count)
        .map(|i| {
            let base = if i < midpoint {
                100.0 + (i as f64 * 0.5)
            } else {
                100.0 + (midpoint as f64 * 0.5) - ((i - midpoint) as f64 * 0.5)
            };
            let close = base + if i < midpoint { 0.1 } else { -0.1 };
            Candle::new(base, base + 0.3, base - 0.3, close, 1000.0 + (i as f64 * 10.0), i as i64 * 300_000)
        })
        .collect()
}

/// Entry threshold lowered so the steady trends above qualify.
fn eager_engine() -> SignalEngine {
    let mut config = EngineConfig::default();
    config.recommendation.entry_threshold = 4.0;
    SignalEngine::new(config).unwrap()
}

fn assert_well_formed(evaluation: &Evaluation) {
    assert!(!evaluation.recommendation.reasons.is_empty());
    for (long, short) in evaluation.long.details.iter().zip(&evaluation.short.details) {
        assert!(
            !(long.met && short.met),
            "long '{}' and short '{}' both met",
            long.condition,
            short.condition
        );
    }
}

#[test]
fn test_strong_uptrend_opens_long_with_benchmark() {
    let snapshot = MarketSnapshot {
        candles: create_uptrend_candles(250),
        market: MarketContext::default()
            .with_sentiment(60.0, "Greed")
            .with_benchmark_direction(TrendDirection::Up),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_well_formed(&evaluation);
    assert_eq!(evaluation.recommendation.action, Action::OpenLong);
    assert!(evaluation
        .recommendation
        .reasons
        .iter()
        .any(|r| r.contains("aligned with long entry")));
}

#[test]
fn test_uptrend_against_benchmark_waits() {
    let snapshot = MarketSnapshot {
        candles: create_uptrend_candles(250),
        market: MarketContext::default().with_benchmark_direction(TrendDirection::Down),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_eq!(evaluation.recommendation.action, Action::Wait);
}

#[test]
fn test_strong_downtrend_opens_short() {
    let benchmark_daily = create_downtrend_candles(60);
    let reading = derive_trend(&benchmark_daily, 20, 0.1).unwrap();
    let snapshot = MarketSnapshot {
        candles: create_downtrend_candles(250),
        market: MarketContext::default().with_benchmark_trend(reading),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_well_formed(&evaluation);
    assert_eq!(evaluation.recommendation.action, Action::OpenShort);
}

#[test]
fn test_downtrend_in_extreme_fear_waits() {
    let snapshot = MarketSnapshot {
        candles: create_downtrend_candles(250),
        market: MarketContext::default().with_sentiment(12.0, "Extreme Fear"),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_eq!(evaluation.recommendation.action, Action::Wait);
    assert!(evaluation
        .recommendation
        .reasons
        .iter()
        .any(|r| r.contains("extreme fear")));
}

#[test]
fn test_ranging_market() {
    let snapshot = MarketSnapshot {
        candles: create_ranging_candles(250, 95.0, 105.0),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_well_formed(&evaluation);
    assert!(matches!(
        evaluation.recommendation.action,
        Action::OpenLong | Action::OpenShort | Action::Wait
    ));
}

#[test]
fn test_high_volatility() {
    let snapshot = MarketSnapshot {
        candles: create_volatile_candles(250),
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_well_formed(&evaluation);
    assert!(evaluation.long.score >= 0.0 && evaluation.short.score >= 0.0);
}

#[test]
fn test_major_reversal_against_long() {
    let candles = create_reversal_candles(250);
    let entry = candles[124].close;
    let snapshot = MarketSnapshot {
        position: Some(PositionInfo::new(PositionSide::Long, entry)),
        trend_candles: create_downtrend_candles(40),
        candles,
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    assert_well_formed(&evaluation);
    let holdability = evaluation.holdability.as_ref().unwrap();
    assert!(holdability.score < 3.0);
    assert_eq!(evaluation.recommendation.action, Action::Close);
}

#[test]
fn test_trend_candles_support_long_hold() {
    let candles = create_uptrend_candles(250);
    let snapshot = MarketSnapshot {
        position: Some(PositionInfo::new(PositionSide::Long, candles[0].close)),
        benchmark_candles: create_uptrend_candles(12),
        trend_candles: create_uptrend_candles(40),
        candles,
        ..MarketSnapshot::default()
    };
    let evaluation = eager_engine().evaluate(&snapshot).unwrap();
    // 8.5 plus benchmark support and trend alignment, clamped
    assert_eq!(evaluation.holdability.as_ref().unwrap().score, 10.0);
    assert_eq!(evaluation.recommendation.action, Action::Hold);
}
