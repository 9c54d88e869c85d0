use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw OHLCV bar. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, timestamp: i64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar open time, when the timestamp is representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Indicator values attached to a single candle. Absent until the
/// indicator's window has enough history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema5: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema10: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema15: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_middle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoch_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoch_d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vma: Option<f64>,
}

/// A candle together with the indicators computed up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    #[serde(flatten)]
    pub indicators: IndicatorValues,
}

impl EnrichedCandle {
    pub fn new(candle: Candle, indicators: IndicatorValues) -> Self {
        Self { candle, indicators }
    }

    pub fn close(&self) -> f64 {
        self.candle.close
    }
}
