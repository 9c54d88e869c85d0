//! Engine configuration.
//!
//! Every window, threshold and rule weight used by the engine lives here so
//! that evaluations are reproducible from a single value. Defaults are the
//! tuned production values; fixtures override them through JSON.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::common::math::StdDevConvention;
use crate::indicators::momentum::ZeroRangePolicy;
use crate::indicators::volatility::AtrSmoothing;
use crate::indicators::volume::VwapWindow;

pub const CONFIG_PATH_VAR: &str = "PERPADVISOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment environment name (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
    pub holdability: HoldabilityConfig,
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Load `.env`, then the JSON file named by `PERPADVISOR_CONFIG` if set.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                debug!("{} not set, using default engine config", CONFIG_PATH_VAR);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Parse and validate. Missing sections fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.holdability.validate()?;
        self.recommendation.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub std_dev_convention: StdDevConvention,
    pub stoch_k_period: usize,
    pub stoch_d_period: usize,
    pub stoch_zero_range: ZeroRangePolicy,
    pub atr_period: usize,
    pub atr_smoothing: AtrSmoothing,
    pub vwap_window: VwapWindow,
    pub vma_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            std_dev_convention: StdDevConvention::Population,
            stoch_k_period: 14,
            stoch_d_period: 3,
            stoch_zero_range: ZeroRangePolicy::Neutral,
            atr_period: 14,
            atr_smoothing: AtrSmoothing::Simple,
            vwap_window: VwapWindow::Cumulative,
            vma_period: 20,
        }
    }
}

impl IndicatorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("bollinger_period", self.bollinger_period),
            ("stoch_k_period", self.stoch_k_period),
            ("stoch_d_period", self.stoch_d_period),
            ("atr_period", self.atr_period),
            ("vma_period", self.vma_period),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
            }
        }
        if let VwapWindow::Rolling(0) = self.vwap_window {
            return Err(ConfigError::Invalid("rolling VWAP window must be > 0".into()));
        }
        non_negative("bollinger_std_dev", self.bollinger_std_dev)
    }
}

/// Weights of the entry rules, one per rule in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryWeights {
    pub band_extreme: f64,
    pub stoch_cross: f64,
    pub stoch_zone: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub vwap: f64,
    pub middle_band_cross: f64,
    pub volume_confirmation: f64,
    pub range_expansion: f64,
}

impl Default for EntryWeights {
    fn default() -> Self {
        Self {
            band_extreme: 2.0,
            stoch_cross: 2.0,
            stoch_zone: 1.0,
            ema_fast: 1.5,
            ema_slow: 1.0,
            vwap: 1.0,
            middle_band_cross: 1.0,
            volume_confirmation: 1.0,
            range_expansion: 0.5,
        }
    }
}

impl EntryWeights {
    fn validate(&self, side: &str) -> Result<(), ConfigError> {
        let weights = [
            ("band_extreme", self.band_extreme),
            ("stoch_cross", self.stoch_cross),
            ("stoch_zone", self.stoch_zone),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("vwap", self.vwap),
            ("middle_band_cross", self.middle_band_cross),
            ("volume_confirmation", self.volume_confirmation),
            ("range_expansion", self.range_expansion),
        ];
        for (name, value) in weights {
            non_negative(&format!("{}_weights.{}", side, name), value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub stoch_oversold: f64,
    pub stoch_overbought: f64,
    /// Volume must exceed VMA times this ratio to confirm a candle.
    pub volume_surge_ratio: f64,
    /// Candle range must exceed ATR times this ratio to count as expansion.
    pub range_expansion_ratio: f64,
    pub long_weights: EntryWeights,
    pub short_weights: EntryWeights,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            stoch_oversold: 20.0,
            stoch_overbought: 80.0,
            volume_surge_ratio: 1.0,
            range_expansion_ratio: 1.5,
            long_weights: EntryWeights::default(),
            short_weights: EntryWeights::default(),
        }
    }
}

impl SignalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("stoch_oversold", self.stoch_oversold)?;
        non_negative("stoch_overbought", self.stoch_overbought)?;
        if self.stoch_oversold >= self.stoch_overbought || self.stoch_overbought > 100.0 {
            return Err(ConfigError::Invalid(
                "stochastic zones must satisfy oversold < overbought <= 100".into(),
            ));
        }
        non_negative("volume_surge_ratio", self.volume_surge_ratio)?;
        non_negative("range_expansion_ratio", self.range_expansion_ratio)?;
        self.long_weights.validate("long")?;
        self.short_weights.validate("short")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldabilityConfig {
    pub base_score: f64,
    pub max_score: f64,
    pub favorable_move_pct: f64,
    pub adverse_move_pct: f64,
    /// Liquidation closer than this percentage of price forces the score to zero.
    pub liquidation_margin_pct: f64,
    /// Benchmark move (percent) needed to count as support or divergence.
    pub divergence_pct: f64,
    pub trend_ema_period: usize,
    pub trend_flat_band_pct: f64,
    pub weights: HoldWeights,
}

impl Default for HoldabilityConfig {
    fn default() -> Self {
        Self {
            base_score: 5.0,
            max_score: 10.0,
            favorable_move_pct: 3.0,
            adverse_move_pct: 2.0,
            liquidation_margin_pct: 5.0,
            divergence_pct: 0.5,
            trend_ema_period: 20,
            trend_flat_band_pct: 0.1,
            weights: HoldWeights::default(),
        }
    }
}

impl HoldabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("base_score", self.base_score)?;
        non_negative("max_score", self.max_score)?;
        if self.base_score > self.max_score {
            return Err(ConfigError::Invalid("base_score must not exceed max_score".into()));
        }
        non_negative("favorable_move_pct", self.favorable_move_pct)?;
        non_negative("adverse_move_pct", self.adverse_move_pct)?;
        non_negative("liquidation_margin_pct", self.liquidation_margin_pct)?;
        non_negative("divergence_pct", self.divergence_pct)?;
        non_negative("trend_flat_band_pct", self.trend_flat_band_pct)?;
        if self.trend_ema_period == 0 {
            return Err(ConfigError::Invalid("trend_ema_period must be > 0".into()));
        }
        self.weights.validate()
    }
}

/// Signed contributions of the holdability rules. Negative values penalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldWeights {
    pub in_profit: f64,
    pub favorable_move: f64,
    pub adverse_move: f64,
    pub liquidation_proximity: f64,
    pub ema_aligned: f64,
    pub momentum_against: f64,
    pub band_against: f64,
    pub benchmark_support: f64,
    pub benchmark_divergence: f64,
    pub trend_aligned: f64,
    pub trend_opposed: f64,
}

impl Default for HoldWeights {
    fn default() -> Self {
        Self {
            in_profit: 1.5,
            favorable_move: 1.0,
            adverse_move: -3.0,
            liquidation_proximity: -10.0,
            ema_aligned: 1.0,
            momentum_against: -1.0,
            band_against: -1.0,
            benchmark_support: 1.0,
            benchmark_divergence: -1.5,
            trend_aligned: 1.5,
            trend_opposed: -1.5,
        }
    }
}

impl HoldWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            self.in_profit,
            self.favorable_move,
            self.adverse_move,
            self.liquidation_proximity,
            self.ema_aligned,
            self.momentum_against,
            self.band_against,
            self.benchmark_support,
            self.benchmark_divergence,
            self.trend_aligned,
            self.trend_opposed,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::Invalid("holdability weights must be finite".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub entry_threshold: f64,
    /// Lead the winning direction must hold over the other.
    pub min_margin: f64,
    pub close_threshold: f64,
    pub caution_threshold: f64,
    /// Longs are vetoed at or above this sentiment value.
    pub extreme_greed: f64,
    /// Shorts are vetoed at or below this sentiment value.
    pub extreme_fear: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            entry_threshold: 5.0,
            min_margin: 2.0,
            close_threshold: 3.0,
            caution_threshold: 6.0,
            extreme_greed: 80.0,
            extreme_fear: 20.0,
        }
    }
}

impl RecommendationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("entry_threshold", self.entry_threshold)?;
        non_negative("min_margin", self.min_margin)?;
        non_negative("caution_threshold", self.caution_threshold)?;
        if !(self.close_threshold.is_finite() && self.close_threshold > 0.0) {
            return Err(ConfigError::Invalid("close_threshold must be > 0".into()));
        }
        if self.close_threshold > self.caution_threshold {
            return Err(ConfigError::Invalid(
                "close_threshold must not exceed caution_threshold".into(),
            ));
        }
        for (name, value) in [("extreme_greed", self.extreme_greed), ("extreme_fear", self.extreme_fear)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} must be within 0..=100", name)));
            }
        }
        if self.extreme_fear >= self.extreme_greed {
            return Err(ConfigError::Invalid("extreme_fear must be below extreme_greed".into()));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be finite and non-negative, got {}",
            name, value
        )))
    }
}
