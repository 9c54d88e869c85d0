//! Unit tests for signal engine

use perpadvisor::config::EngineConfig;
use perpadvisor::error::EngineError;
use perpadvisor::models::indicators::Candle;
use perpadvisor::models::market::MarketContext;
use perpadvisor::models::position::{PositionInfo, PositionSide};
use perpadvisor::models::recommendation::Action;
use perpadvisor::models::snapshot::MarketSnapshot;
use perpadvisor::signals::engine::SignalEngine;

// Offsets are dyadic so %K is exact and never drifts across %D.
fn create_uptrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.5);
            Candle::new(
                price,
                price + 1.0,
                price - 0.5,
                price + 0.5,
                1000.0 + (i as f64 * 10.0),
                i as i64 * 300_000,
            )
        })
        .collect()
}

fn create_downtrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let price = 200.0 - (i as f64 * 0.5);
            Candle::new(
                price,
                price + 0.5,
                price - 1.0,
                price - 0.5,
                1000.0 + (i as f64 * 10.0),
                i as i64 * 300_000,
            )
        })
        .collect()
}

fn engine() -> SignalEngine {
    SignalEngine::new(EngineConfig::default()).unwrap()
}

#[test]
fn test_evaluate_empty_snapshot() {
    let evaluation = engine().evaluate(&MarketSnapshot::default()).unwrap();
    assert!(evaluation.latest.is_none());
    assert_eq!(evaluation.long.score, 0.0);
    assert_eq!(evaluation.short.score, 0.0);
    assert!(evaluation.holdability.is_none());
    assert_eq!(evaluation.recommendation.action, Action::Wait);
    assert!(!evaluation.recommendation.reasons.is_empty());
}

#[test]
fn test_evaluate_insufficient_data() {
    let snapshot = MarketSnapshot {
        candles: create_uptrend_candles(3),
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    assert!(evaluation.latest.is_some());
    assert_eq!(evaluation.recommendation.action, Action::Wait);
}

#[test]
fn test_evaluate_uptrend_scores() {
    let snapshot = MarketSnapshot {
        symbol: Some("BTC".into()),
        candles: create_uptrend_candles(250),
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    assert_eq!(evaluation.symbol.as_deref(), Some("BTC"));
    assert!((evaluation.long.score - 4.5).abs() < 1e-9);
    assert!((evaluation.short.score - 1.0).abs() < 1e-9);
    assert!(evaluation.long.is_met("EMA5 above EMA10"));
    assert!(evaluation.short.is_met("Stochastic %K in overbought zone (>80)"));
    // Below the default entry threshold.
    assert_eq!(evaluation.recommendation.action, Action::Wait);
}

#[test]
fn test_evaluate_downtrend_scores() {
    let snapshot = MarketSnapshot {
        candles: create_downtrend_candles(250),
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    assert!((evaluation.short.score - 4.5).abs() < 1e-9);
    assert!((evaluation.long.score - 1.0).abs() < 1e-9);
    assert!(evaluation.short.is_met("Bearish candle on above-average volume"));
}

#[test]
fn test_open_long_in_uptrend_holds() {
    let candles = create_uptrend_candles(250);
    let snapshot = MarketSnapshot {
        position: Some(PositionInfo::new(PositionSide::Long, candles[0].close)),
        candles,
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    let holdability = evaluation.holdability.unwrap();
    // base 5 + in profit 1.5 + favorable move 1 + EMA aligned 1
    assert!((holdability.score - 8.5).abs() < 1e-9);
    assert_eq!(evaluation.recommendation.action, Action::Hold);
}

#[test]
fn test_open_long_in_downtrend_closes() {
    let candles = create_downtrend_candles(250);
    let snapshot = MarketSnapshot {
        position: Some(PositionInfo::new(PositionSide::Long, candles[0].close)),
        candles,
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    assert!((evaluation.holdability.unwrap().score - 2.0).abs() < 1e-9);
    assert_eq!(evaluation.recommendation.action, Action::Close);
    assert!(evaluation.recommendation.reasons[0].contains("below close threshold"));
}

#[test]
fn test_near_liquidation_closes() {
    let candles = create_uptrend_candles(250);
    let last_close = candles[249].close;
    let snapshot = MarketSnapshot {
        position: Some(
            PositionInfo::new(PositionSide::Long, candles[0].close)
                .with_liquidation_price(last_close * 0.98),
        ),
        candles,
        ..MarketSnapshot::default()
    };
    let evaluation = engine().evaluate(&snapshot).unwrap();
    let holdability = evaluation.holdability.unwrap();
    assert_eq!(holdability.score, 0.0);
    assert!(holdability.liquidation_risk);
    assert_eq!(evaluation.recommendation.action, Action::Close);
}

#[test]
fn test_non_finite_candle_is_error() {
    let mut candles = create_uptrend_candles(30);
    candles[10].volume = f64::NAN;
    let snapshot = MarketSnapshot {
        candles,
        ..MarketSnapshot::default()
    };
    let err = engine().evaluate(&snapshot).unwrap_err();
    assert!(matches!(err, EngineError::Indicator(_)));
}

#[test]
fn test_non_finite_sentiment_is_error() {
    let snapshot = MarketSnapshot {
        candles: create_uptrend_candles(30),
        market: MarketContext {
            sentiment_value: Some(f64::NAN),
            ..MarketContext::default()
        },
        ..MarketSnapshot::default()
    };
    let err = engine().evaluate(&snapshot).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMarketContext(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.indicators.stoch_k_period = 0;
    assert!(matches!(
        SignalEngine::new(config),
        Err(EngineError::Config(_))
    ));
}

#[test]
fn test_evaluate_snapshot_from_json() {
    let raw = r#"{
        "symbol": "ETH",
        "candles": [
            { "timestamp": 0, "open": 10.0, "high": 11.0, "low": 9.0, "close": 10.5, "volume": 5.0 },
            { "timestamp": 60000, "open": 10.5, "high": 12.0, "low": 10.0, "close": 11.5, "volume": 7.0 }
        ],
        "position": { "side": "short", "entry_price": 12.0 },
        "market": { "sentiment_value": 40, "sentiment_classification": "Fear", "benchmark_daily_trend": "down" }
    }"#;
    let snapshot: MarketSnapshot = serde_json::from_str(raw).unwrap();
    let evaluation = engine().evaluate(&snapshot).unwrap();
    assert!(evaluation.holdability.is_some());
    assert!(matches!(
        evaluation.recommendation.action,
        Action::Hold | Action::Close
    ));

    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["symbol"], "ETH");
    assert_eq!(json["latest"]["close"], 11.5);
    assert_eq!(json["recommendation"]["action"], "Hold");
}

#[test]
fn test_demo_snapshots_evaluate() {
    let config =
        EngineConfig::from_json_str(include_str!("../../../demos/config.json")).unwrap();
    let engine = SignalEngine::new(config).unwrap();

    let open: MarketSnapshot =
        serde_json::from_str(include_str!("../../../demos/snapshot.json")).unwrap();
    let evaluation = engine.evaluate(&open).unwrap();
    assert!(evaluation.holdability.is_some());
    assert!(matches!(
        evaluation.recommendation.action,
        Action::Hold | Action::Close
    ));

    let flat: MarketSnapshot =
        serde_json::from_str(include_str!("../../../demos/snapshot_flat.json")).unwrap();
    let evaluation = engine.evaluate(&flat).unwrap();
    assert!(evaluation.holdability.is_none());
    assert!(!evaluation.recommendation.reasons.is_empty());
}

#[test]
fn test_engine_exposes_configured_components() {
    let mut config = EngineConfig::default();
    config.indicators.bollinger_period = 10;
    config.recommendation.entry_threshold = 4.0;
    let engine = SignalEngine::new(config).unwrap();

    assert_eq!(engine.indicators().config().bollinger_period, 10);
    assert_eq!(engine.decision().config().entry_threshold, 4.0);
    assert_eq!(
        engine
            .scorer()
            .rules(perpadvisor::models::signal::Direction::Short)
            .rules()
            .len(),
        9
    );
    assert_eq!(engine.holdability().rules().rules().len(), 11);
}
