use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Flat => "flat",
        }
    }
}

/// Direction of a series relative to its own EMA at the last candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub direction: TrendDirection,
    pub ema: f64,
    pub close: f64,
}

/// Broad market signals supplied alongside the candles. Every field may be
/// absent and is passed through as such.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_daily_trend: Option<TrendDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_daily_ema: Option<f64>,
}

impl MarketContext {
    pub fn with_sentiment(mut self, value: f64, classification: impl Into<String>) -> Self {
        self.sentiment_value = Some(value);
        self.sentiment_classification = Some(classification.into());
        self
    }

    pub fn with_benchmark_trend(mut self, reading: TrendReading) -> Self {
        self.benchmark_daily_trend = Some(reading.direction);
        self.benchmark_daily_ema = Some(reading.ema);
        self
    }

    pub fn with_benchmark_direction(mut self, direction: TrendDirection) -> Self {
        self.benchmark_daily_trend = Some(direction);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(value) = self.sentiment_value {
            if !value.is_finite() {
                return Err(EngineError::InvalidMarketContext(format!(
                    "sentiment value must be finite, got {}",
                    value
                )));
            }
        }
        if let Some(ema) = self.benchmark_daily_ema {
            if !ema.is_finite() {
                return Err(EngineError::InvalidMarketContext(format!(
                    "benchmark EMA must be finite, got {}",
                    ema
                )));
            }
        }
        Ok(())
    }
}
