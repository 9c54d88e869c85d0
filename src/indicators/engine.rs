//! Candle enrichment: attaches every configured indicator to each candle.

use tracing::debug;

use crate::config::IndicatorConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_stochastic;
use crate::indicators::trend::calculate_ema;
use crate::indicators::validation::validate_candles;
use crate::indicators::volatility::{calculate_atr, calculate_bollinger_bands};
use crate::indicators::volume::{calculate_vma, calculate_vwap};
use crate::models::indicators::{Candle, EnrichedCandle, IndicatorValues};

pub const EMA_FAST: usize = 5;
pub const EMA_MID: usize = 10;
pub const EMA_SLOW: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Enrich an ascending candle series. The output has the same length and
    /// carries the raw candles unchanged.
    pub fn enrich(&self, candles: &[Candle]) -> Result<Vec<EnrichedCandle>, IndicatorError> {
        validate_candles(candles)?;
        let cfg = &self.config;

        let ema5 = calculate_ema(candles, EMA_FAST);
        let ema10 = calculate_ema(candles, EMA_MID);
        let ema15 = calculate_ema(candles, EMA_SLOW);
        let bands = calculate_bollinger_bands(
            candles,
            cfg.bollinger_period,
            cfg.bollinger_std_dev,
            cfg.std_dev_convention,
        );
        let stoch = calculate_stochastic(
            candles,
            cfg.stoch_k_period,
            cfg.stoch_d_period,
            cfg.stoch_zero_range,
        );
        let vwap = calculate_vwap(candles, cfg.vwap_window);
        let atr = calculate_atr(candles, cfg.atr_period, cfg.atr_smoothing);
        let vma = calculate_vma(candles, cfg.vma_period);

        let enriched: Vec<EnrichedCandle> = candles
            .iter()
            .enumerate()
            .map(|(i, candle)| {
                let band = bands[i];
                EnrichedCandle::new(
                    *candle,
                    IndicatorValues {
                        ema5: ema5[i],
                        ema10: ema10[i],
                        ema15: ema15[i],
                        bb_upper: band.map(|b| b.upper),
                        bb_middle: band.map(|b| b.middle),
                        bb_lower: band.map(|b| b.lower),
                        stoch_k: stoch.k[i],
                        stoch_d: stoch.d[i],
                        vwap: vwap[i],
                        atr: atr[i],
                        vma: vma[i],
                    },
                )
            })
            .collect();

        debug!(candles = enriched.len(), "Enriched candle series");
        Ok(enriched)
    }
}
