//! Holdability scoring for an open position.
//!
//! Starts from a neutral base score and adds the signed weight of every met
//! rule, clamped to `[0, max_score]`. A liquidation price inside the safety
//! margin overrides everything and pins the score to zero.

use tracing::debug;

use crate::common::math;
use crate::config::{HoldWeights, HoldabilityConfig};
use crate::error::EngineError;
use crate::indicators::trend::derive_trend;
use crate::indicators::validation::validate_candles;
use crate::models::indicators::{Candle, EnrichedCandle};
use crate::models::market::{TrendDirection, TrendReading};
use crate::models::position::{PositionInfo, PositionSide};
use crate::models::recommendation::HoldabilityAssessment;
use crate::signals::categories::RuleCategory;
use crate::signals::rules::{Rule, RuleBook};

pub const LIQUIDATION_RULE: &str = "liquidation_proximity";

/// Inputs visible to a holdability rule.
#[derive(Debug, Clone)]
pub struct HoldContext {
    pub current: EnrichedCandle,
    pub position: PositionInfo,
    /// Percentage change across the supplied benchmark candles.
    pub benchmark_change_pct: Option<f64>,
    pub trend: Option<TrendReading>,
}

impl HoldContext {
    fn side(&self) -> PositionSide {
        self.position.side
    }

    fn pnl_pct(&self) -> f64 {
        self.position.pnl_pct(self.current.close())
    }

    /// Benchmark change signed so that positive favours the position.
    fn benchmark_favour(&self) -> Option<f64> {
        self.benchmark_change_pct.map(|c| c * self.side().sign())
    }
}

#[derive(Debug)]
pub struct HoldabilityScorer {
    config: HoldabilityConfig,
    rules: RuleBook<HoldContext>,
}

impl HoldabilityScorer {
    pub fn new(config: HoldabilityConfig) -> Self {
        let rules = RuleBook::new(hold_rules(&config));
        Self { config, rules }
    }

    pub fn rules(&self) -> &RuleBook<HoldContext> {
        &self.rules
    }

    pub fn assess(
        &self,
        history: &[EnrichedCandle],
        position: &PositionInfo,
        benchmark: &[Candle],
        trend_candles: &[Candle],
    ) -> Result<HoldabilityAssessment, EngineError> {
        position.validate()?;
        validate_candles(benchmark)?;
        validate_candles(trend_candles)?;

        let Some(current) = history.last() else {
            debug!("No candles for holdability, reporting base score");
            return Ok(HoldabilityAssessment::new(
                self.config.base_score,
                self.rules.unmet().details(),
            ));
        };

        let ctx = HoldContext {
            current: current.clone(),
            position: position.clone(),
            benchmark_change_pct: benchmark_change(benchmark),
            trend: derive_trend(
                trend_candles,
                self.config.trend_ema_period,
                self.config.trend_flat_band_pct,
            ),
        };

        let evaluation = self.rules.evaluate(&ctx);
        let liquidation_risk = evaluation.is_met(LIQUIDATION_RULE);
        let score = if liquidation_risk {
            0.0
        } else {
            (self.config.base_score + evaluation.score()).clamp(0.0, self.config.max_score)
        };

        debug!(
            side = position.side.label(),
            score,
            liquidation_risk,
            "Assessed holdability"
        );

        Ok(HoldabilityAssessment {
            score,
            details: evaluation.details(),
            liquidation_risk,
        })
    }
}

fn benchmark_change(benchmark: &[Candle]) -> Option<f64> {
    match benchmark {
        [first, .., last] => math::percent_change(first.close, last.close),
        _ => None,
    }
}

pub fn hold_rules(config: &HoldabilityConfig) -> Vec<Rule<HoldContext>> {
    let w: &HoldWeights = &config.weights;
    let favorable = config.favorable_move_pct;
    let adverse = config.adverse_move_pct;
    let margin = config.liquidation_margin_pct;
    let divergence = config.divergence_pct;

    vec![
        Rule::new(
            "in_profit",
            "Position in profit",
            RuleCategory::Pnl,
            w.in_profit,
            |c: &HoldContext| Some(c.pnl_pct() > 0.0),
        ),
        Rule::new(
            "favorable_move",
            format!("Favorable move beyond {}% from entry", favorable),
            RuleCategory::Pnl,
            w.favorable_move,
            move |c: &HoldContext| Some(c.pnl_pct() > favorable),
        ),
        Rule::new(
            "adverse_move",
            format!("Adverse move beyond {}% from entry", adverse),
            RuleCategory::Pnl,
            w.adverse_move,
            move |c: &HoldContext| Some(c.pnl_pct() < -adverse),
        ),
        Rule::new(
            LIQUIDATION_RULE,
            format!("Liquidation price within {}% of current price", margin),
            RuleCategory::Risk,
            w.liquidation_proximity,
            move |c: &HoldContext| {
                let liq = c.position.liquidation_price?;
                let close = c.current.close();
                if close <= 0.0 {
                    return None;
                }
                let breached = match c.side() {
                    PositionSide::Long => close <= liq,
                    PositionSide::Short => close >= liq,
                };
                let distance_pct = (close - liq).abs() / close * 100.0;
                Some(breached || distance_pct < margin)
            },
        ),
        Rule::new(
            "ema_aligned",
            "EMA5 aligned with position",
            RuleCategory::Trend,
            w.ema_aligned,
            |c: &HoldContext| {
                let (fast, mid) = (c.current.indicators.ema5?, c.current.indicators.ema10?);
                Some(match c.side() {
                    PositionSide::Long => fast > mid,
                    PositionSide::Short => fast < mid,
                })
            },
        ),
        Rule::new(
            "momentum_against",
            "Stochastic momentum against position",
            RuleCategory::Momentum,
            w.momentum_against,
            |c: &HoldContext| {
                let (k, d) = (c.current.indicators.stoch_k?, c.current.indicators.stoch_d?);
                Some(match c.side() {
                    PositionSide::Long => k < d,
                    PositionSide::Short => k > d,
                })
            },
        ),
        Rule::new(
            "band_against",
            "Close beyond Bollinger band against position",
            RuleCategory::Volatility,
            w.band_against,
            |c: &HoldContext| {
                let close = c.current.close();
                Some(match c.side() {
                    PositionSide::Long => close < c.current.indicators.bb_lower?,
                    PositionSide::Short => close > c.current.indicators.bb_upper?,
                })
            },
        ),
        Rule::new(
            "benchmark_support",
            "Benchmark momentum supports position",
            RuleCategory::Benchmark,
            w.benchmark_support,
            move |c: &HoldContext| Some(c.benchmark_favour()? > divergence),
        ),
        Rule::new(
            "benchmark_divergence",
            "Benchmark momentum diverges against position",
            RuleCategory::Benchmark,
            w.benchmark_divergence,
            move |c: &HoldContext| Some(c.benchmark_favour()? < -divergence),
        ),
        Rule::new(
            "trend_aligned",
            "Medium-horizon trend aligned with position",
            RuleCategory::Trend,
            w.trend_aligned,
            |c: &HoldContext| {
                let trend = c.trend?.direction;
                Some(matches!(
                    (c.side(), trend),
                    (PositionSide::Long, TrendDirection::Up) | (PositionSide::Short, TrendDirection::Down)
                ))
            },
        ),
        Rule::new(
            "trend_opposed",
            "Medium-horizon trend opposed to position",
            RuleCategory::Trend,
            w.trend_opposed,
            |c: &HoldContext| {
                let trend = c.trend?.direction;
                Some(matches!(
                    (c.side(), trend),
                    (PositionSide::Long, TrendDirection::Down) | (PositionSide::Short, TrendDirection::Up)
                ))
            },
        ),
    ]
}
