//! Entry scoring: independent long and short rule batteries evaluated over
//! the latest enriched candle and its predecessor.

use crate::config::{EntryWeights, SignalConfig};
use crate::models::indicators::EnrichedCandle;
use crate::models::signal::{Direction, DirectionalSignal};
use crate::signals::categories::RuleCategory;
use crate::signals::rules::{Rule, RuleBook, RuleEvaluation};

/// Inputs visible to an entry rule.
#[derive(Debug, Clone)]
pub struct EntryContext {
    pub current: EnrichedCandle,
    pub previous: Option<EnrichedCandle>,
}

impl EntryContext {
    /// Context at the end of `history`, `None` when it is empty.
    pub fn from_history(history: &[EnrichedCandle]) -> Option<Self> {
        let (current, rest) = history.split_last()?;
        Some(Self {
            current: current.clone(),
            previous: rest.last().cloned(),
        })
    }
}

#[derive(Debug)]
pub struct SignalScorer {
    long: RuleBook<EntryContext>,
    short: RuleBook<EntryContext>,
}

impl SignalScorer {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            long: RuleBook::new(long_rules(config)),
            short: RuleBook::new(short_rules(config)),
        }
    }

    pub fn rules(&self, direction: Direction) -> &RuleBook<EntryContext> {
        match direction {
            Direction::Long => &self.long,
            Direction::Short => &self.short,
        }
    }

    /// Score one direction over an ascending enriched history.
    pub fn score(&self, history: &[EnrichedCandle], direction: Direction) -> DirectionalSignal {
        let book = self.rules(direction);
        let evaluation = match EntryContext::from_history(history) {
            Some(ctx) => book.evaluate(&ctx),
            None => book.unmet(),
        };
        into_signal(direction, &evaluation)
    }
}

fn into_signal(direction: Direction, evaluation: &RuleEvaluation) -> DirectionalSignal {
    DirectionalSignal {
        direction,
        score: evaluation.score(),
        reasons: evaluation.reasons(),
        types: evaluation.categories(),
        details: evaluation.details(),
    }
}

pub fn long_rules(config: &SignalConfig) -> Vec<Rule<EntryContext>> {
    let w: &EntryWeights = &config.long_weights;
    let oversold = config.stoch_oversold;
    let surge = config.volume_surge_ratio;
    let expansion = config.range_expansion_ratio;

    vec![
        Rule::new(
            "band_extreme",
            "Close below lower Bollinger band",
            RuleCategory::Volatility,
            w.band_extreme,
            |c: &EntryContext| Some(c.current.close() < c.current.indicators.bb_lower?),
        ),
        Rule::new(
            "stoch_cross",
            format!("%K crossed above %D from oversold (<{})", oversold),
            RuleCategory::Momentum,
            w.stoch_cross,
            move |c: &EntryContext| {
                let prev = c.previous.as_ref()?;
                let (k, d) = (c.current.indicators.stoch_k?, c.current.indicators.stoch_d?);
                let (pk, pd) = (prev.indicators.stoch_k?, prev.indicators.stoch_d?);
                Some(pk <= pd && k > d && pk < oversold)
            },
        ),
        Rule::new(
            "stoch_zone",
            format!("Stochastic %K in oversold zone (<{})", oversold),
            RuleCategory::Momentum,
            w.stoch_zone,
            move |c: &EntryContext| Some(c.current.indicators.stoch_k? < oversold),
        ),
        Rule::new(
            "ema_fast",
            "EMA5 above EMA10",
            RuleCategory::Trend,
            w.ema_fast,
            |c: &EntryContext| Some(c.current.indicators.ema5? > c.current.indicators.ema10?),
        ),
        Rule::new(
            "ema_slow",
            "EMA10 above EMA15",
            RuleCategory::Trend,
            w.ema_slow,
            |c: &EntryContext| Some(c.current.indicators.ema10? > c.current.indicators.ema15?),
        ),
        Rule::new(
            "vwap",
            "Close above VWAP",
            RuleCategory::Trend,
            w.vwap,
            |c: &EntryContext| Some(c.current.close() > c.current.indicators.vwap?),
        ),
        Rule::new(
            "middle_band_cross",
            "Close crossed above Bollinger middle band",
            RuleCategory::Trend,
            w.middle_band_cross,
            |c: &EntryContext| {
                let prev = c.previous.as_ref()?;
                Some(
                    prev.close() <= prev.indicators.bb_middle?
                        && c.current.close() > c.current.indicators.bb_middle?,
                )
            },
        ),
        Rule::new(
            "volume_confirmation",
            "Bullish candle on above-average volume",
            RuleCategory::Volume,
            w.volume_confirmation,
            move |c: &EntryContext| {
                let vma = c.current.indicators.vma?;
                Some(c.current.candle.is_bullish() && c.current.candle.volume > vma * surge)
            },
        ),
        Rule::new(
            "range_expansion",
            "Range expansion on bullish candle",
            RuleCategory::Volatility,
            w.range_expansion,
            move |c: &EntryContext| {
                let atr = c.current.indicators.atr?;
                Some(c.current.candle.is_bullish() && c.current.candle.range() > atr * expansion)
            },
        ),
    ]
}

pub fn short_rules(config: &SignalConfig) -> Vec<Rule<EntryContext>> {
    let w: &EntryWeights = &config.short_weights;
    let overbought = config.stoch_overbought;
    let surge = config.volume_surge_ratio;
    let expansion = config.range_expansion_ratio;

    vec![
        Rule::new(
            "band_extreme",
            "Close above upper Bollinger band",
            RuleCategory::Volatility,
            w.band_extreme,
            |c: &EntryContext| Some(c.current.close() > c.current.indicators.bb_upper?),
        ),
        Rule::new(
            "stoch_cross",
            format!("%K crossed below %D from overbought (>{})", overbought),
            RuleCategory::Momentum,
            w.stoch_cross,
            move |c: &EntryContext| {
                let prev = c.previous.as_ref()?;
                let (k, d) = (c.current.indicators.stoch_k?, c.current.indicators.stoch_d?);
                let (pk, pd) = (prev.indicators.stoch_k?, prev.indicators.stoch_d?);
                Some(pk >= pd && k < d && pk > overbought)
            },
        ),
        Rule::new(
            "stoch_zone",
            format!("Stochastic %K in overbought zone (>{})", overbought),
            RuleCategory::Momentum,
            w.stoch_zone,
            move |c: &EntryContext| Some(c.current.indicators.stoch_k? > overbought),
        ),
        Rule::new(
            "ema_fast",
            "EMA5 below EMA10",
            RuleCategory::Trend,
            w.ema_fast,
            |c: &EntryContext| Some(c.current.indicators.ema5? < c.current.indicators.ema10?),
        ),
        Rule::new(
            "ema_slow",
            "EMA10 below EMA15",
            RuleCategory::Trend,
            w.ema_slow,
            |c: &EntryContext| Some(c.current.indicators.ema10? < c.current.indicators.ema15?),
        ),
        Rule::new(
            "vwap",
            "Close below VWAP",
            RuleCategory::Trend,
            w.vwap,
            |c: &EntryContext| Some(c.current.close() < c.current.indicators.vwap?),
        ),
        Rule::new(
            "middle_band_cross",
            "Close crossed below Bollinger middle band",
            RuleCategory::Trend,
            w.middle_band_cross,
            |c: &EntryContext| {
                let prev = c.previous.as_ref()?;
                Some(
                    prev.close() >= prev.indicators.bb_middle?
                        && c.current.close() < c.current.indicators.bb_middle?,
                )
            },
        ),
        Rule::new(
            "volume_confirmation",
            "Bearish candle on above-average volume",
            RuleCategory::Volume,
            w.volume_confirmation,
            move |c: &EntryContext| {
                let vma = c.current.indicators.vma?;
                Some(c.current.candle.is_bearish() && c.current.candle.volume > vma * surge)
            },
        ),
        Rule::new(
            "range_expansion",
            "Range expansion on bearish candle",
            RuleCategory::Volatility,
            w.range_expansion,
            move |c: &EntryContext| {
                let atr = c.current.indicators.atr?;
                Some(c.current.candle.is_bearish() && c.current.candle.range() > atr * expansion)
            },
        ),
    ]
}
