//! End-to-end evaluation of one market snapshot.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::indicators::IndicatorEngine;
use crate::models::position::PositionState;
use crate::models::signal::Direction;
use crate::models::snapshot::{Evaluation, MarketSnapshot};
use crate::signals::decision::RecommendationEngine;
use crate::signals::holdability::HoldabilityScorer;
use crate::signals::scoring::SignalScorer;

/// Wires indicator enrichment, both scorers and the decision function.
#[derive(Debug)]
pub struct SignalEngine {
    indicators: IndicatorEngine,
    scorer: SignalScorer,
    holdability: HoldabilityScorer,
    decision: RecommendationEngine,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            scorer: SignalScorer::new(&config.signals),
            indicators: IndicatorEngine::new(config.indicators),
            holdability: HoldabilityScorer::new(config.holdability),
            decision: RecommendationEngine::new(config.recommendation),
        })
    }

    pub fn indicators(&self) -> &IndicatorEngine {
        &self.indicators
    }

    pub fn scorer(&self) -> &SignalScorer {
        &self.scorer
    }

    pub fn holdability(&self) -> &HoldabilityScorer {
        &self.holdability
    }

    pub fn decision(&self) -> &RecommendationEngine {
        &self.decision
    }

    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> Result<Evaluation, EngineError> {
        snapshot.market.validate()?;
        let enriched = self.indicators.enrich(&snapshot.candles)?;

        let long = self.scorer.score(&enriched, Direction::Long);
        let short = self.scorer.score(&enriched, Direction::Short);
        debug!(
            long_score = long.score,
            short_score = short.score,
            "Scored entry signals"
        );

        let holdability = snapshot
            .position
            .as_ref()
            .map(|position| {
                self.holdability.assess(
                    &enriched,
                    position,
                    &snapshot.benchmark_candles,
                    &snapshot.trend_candles,
                )
            })
            .transpose()?;

        let state = PositionState::of(snapshot.position.as_ref());
        let recommendation = self.decision.recommend(
            state,
            &long,
            &short,
            holdability.as_ref(),
            &snapshot.market,
        );

        debug!(
            candles = snapshot.candles.len(),
            action = %recommendation.action,
            "Snapshot evaluated"
        );

        Ok(Evaluation {
            symbol: snapshot.symbol.clone(),
            latest: enriched.last().cloned(),
            long,
            short,
            holdability,
            recommendation,
        })
    }
}
