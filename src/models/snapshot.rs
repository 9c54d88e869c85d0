use serde::{Deserialize, Serialize};

use super::indicators::{Candle, EnrichedCandle};
use super::market::MarketContext;
use super::position::PositionInfo;
use super::recommendation::{HoldabilityAssessment, Recommendation};
use super::signal::DirectionalSignal;

/// Fully materialized inputs for one evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub candles: Vec<Candle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionInfo>,
    /// Short-horizon candles of the correlated benchmark asset.
    #[serde(default)]
    pub benchmark_candles: Vec<Candle>,
    /// Medium-horizon candles of the traded asset.
    #[serde(default)]
    pub trend_candles: Vec<Candle>,
    #[serde(default)]
    pub market: MarketContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<EnrichedCandle>,
    pub long: DirectionalSignal,
    pub short: DirectionalSignal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdability: Option<HoldabilityAssessment>,
    pub recommendation: Recommendation,
}
