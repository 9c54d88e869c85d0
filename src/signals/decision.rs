//! Recommendation decision function.
//!
//! Keyed by the caller's position state. Flat positions are evaluated for an
//! entry; open positions are only ever held or closed. Every path produces at
//! least one reason, in evaluation order.

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::models::market::{MarketContext, TrendDirection};
use crate::models::position::{PositionSide, PositionState};
use crate::models::recommendation::{Action, HoldabilityAssessment, Recommendation};
use crate::models::signal::{Direction, DirectionalSignal};

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    pub fn recommend(
        &self,
        state: PositionState,
        long: &DirectionalSignal,
        short: &DirectionalSignal,
        holdability: Option<&HoldabilityAssessment>,
        market: &MarketContext,
    ) -> Recommendation {
        let recommendation = match state.side() {
            None => self.decide_entry(long, short, market),
            Some(side) => {
                let opposing = match side {
                    PositionSide::Long => short,
                    PositionSide::Short => long,
                };
                self.decide_open(side, opposing, holdability, market)
            }
        };
        debug!(
            state = ?state,
            action = ?recommendation.action,
            reasons = recommendation.reasons.len(),
            "Recommendation decided"
        );
        recommendation
    }

    fn decide_entry(
        &self,
        long: &DirectionalSignal,
        short: &DirectionalSignal,
        market: &MarketContext,
    ) -> Recommendation {
        let cfg = &self.config;
        let mut reasons = Vec::new();

        let (direction, lead, other) = if long.score >= short.score {
            (Direction::Long, long, short)
        } else {
            (Direction::Short, short, long)
        };

        // A NaN score never clears a threshold.
        if !(lead.score >= cfg.entry_threshold) {
            reasons.push(format!(
                "No entry signal: long score {:.1} and short score {:.1} are below entry threshold {:.1}",
                long.score, short.score, cfg.entry_threshold
            ));
            return wait(reasons);
        }

        if other.score >= cfg.entry_threshold {
            reasons.push(format!(
                "Both long score {:.1} and short score {:.1} clear entry threshold {:.1}; conflicting signals",
                long.score, short.score, cfg.entry_threshold
            ));
            return wait(reasons);
        }

        let margin = lead.score - other.score;
        if !(margin > 0.0 && margin >= cfg.min_margin) {
            reasons.push(format!(
                "{} score {:.1} clears entry threshold {:.1} but leads {} score {:.1} by only {:.1} (required margin {:.1})",
                capitalize(direction.label()),
                lead.score,
                cfg.entry_threshold,
                direction.opposite().label(),
                other.score,
                margin,
                cfg.min_margin
            ));
            return wait(reasons);
        }

        reasons.push(format!(
            "{} score {:.1} clears entry threshold {:.1} with margin {:.1} over {} score {:.1}",
            capitalize(direction.label()),
            lead.score,
            cfg.entry_threshold,
            margin,
            direction.opposite().label(),
            other.score
        ));

        let trend_veto = self.check_benchmark(direction, market, &mut reasons);
        let sentiment_veto = self.check_sentiment(direction, market, &mut reasons);

        if trend_veto || sentiment_veto {
            reasons.push(format!(
                "Market context vetoes {} entry; waiting",
                direction.label()
            ));
            return wait(reasons);
        }

        reasons.push(format!("Recommend opening {}", direction.label()));
        Recommendation {
            action: match direction {
                Direction::Long => Action::OpenLong,
                Direction::Short => Action::OpenShort,
            },
            reasons,
        }
    }

    /// Returns true when the benchmark trend opposes the entry.
    fn check_benchmark(
        &self,
        direction: Direction,
        market: &MarketContext,
        reasons: &mut Vec<String>,
    ) -> bool {
        let Some(trend) = market.benchmark_daily_trend else {
            reasons.push("Benchmark daily trend unavailable; no trend confirmation".to_string());
            return false;
        };

        let opposed = matches!(
            (direction, trend),
            (Direction::Long, TrendDirection::Down) | (Direction::Short, TrendDirection::Up)
        );
        let reason = match trend {
            TrendDirection::Flat => {
                "Benchmark daily trend is flat; no trend confirmation".to_string()
            }
            _ if opposed => format!(
                "Benchmark daily trend is {}, opposing {} entry",
                trend.label(),
                direction.label()
            ),
            _ => format!(
                "Benchmark daily trend is {}, aligned with {} entry",
                trend.label(),
                direction.label()
            ),
        };
        reasons.push(reason);
        opposed
    }

    /// Returns true when sentiment sits at the extreme that tends to reverse
    /// against the entry.
    fn check_sentiment(
        &self,
        direction: Direction,
        market: &MarketContext,
        reasons: &mut Vec<String>,
    ) -> bool {
        let Some(value) = market.sentiment_value else {
            reasons.push("Sentiment index unavailable".to_string());
            return false;
        };
        let classification = market
            .sentiment_classification
            .as_deref()
            .unwrap_or("unclassified");

        let extreme = match direction {
            Direction::Long if value >= self.config.extreme_greed => Some("greed"),
            Direction::Short if value <= self.config.extreme_fear => Some("fear"),
            _ => None,
        };

        match extreme {
            Some(kind) => {
                reasons.push(format!(
                    "Sentiment {:.0} ({}) at extreme {}, reversal risk for {} entry",
                    value,
                    classification,
                    kind,
                    direction.label()
                ));
                true
            }
            None => {
                reasons.push(format!(
                    "Sentiment {:.0} ({}) does not oppose {} entry",
                    value,
                    classification,
                    direction.label()
                ));
                false
            }
        }
    }

    fn decide_open(
        &self,
        side: PositionSide,
        opposing: &DirectionalSignal,
        holdability: Option<&HoldabilityAssessment>,
        market: &MarketContext,
    ) -> Recommendation {
        let cfg = &self.config;
        let mut reasons = Vec::new();

        let action = match holdability {
            None => {
                reasons.push(format!(
                    "Holdability not assessed for open {} position; holding",
                    side.label()
                ));
                Action::Hold
            }
            Some(h) if h.liquidation_risk => {
                reasons.push(format!(
                    "Liquidation price within safety margin; close {} position",
                    side.label()
                ));
                Action::Close
            }
            Some(h) if h.score < cfg.close_threshold => {
                reasons.push(format!(
                    "Holdability score {:.1} below close threshold {:.1}; close {} position",
                    h.score,
                    cfg.close_threshold,
                    side.label()
                ));
                Action::Close
            }
            Some(h) if h.score < cfg.caution_threshold => {
                reasons.push(format!(
                    "Holdability score {:.1} below caution threshold {:.1}",
                    h.score, cfg.caution_threshold
                ));
                reasons.push(format!(
                    "Caution: conditions weakening for {} position; tighten risk",
                    side.label()
                ));
                Action::Hold
            }
            Some(h) => {
                reasons.push(format!(
                    "Holdability score {:.1} at or above caution threshold {:.1}; hold {} position",
                    h.score,
                    cfg.caution_threshold,
                    side.label()
                ));
                Action::Hold
            }
        };

        if action == Action::Hold {
            if let Some(trend) = market.benchmark_daily_trend {
                let against = matches!(
                    (side, trend),
                    (PositionSide::Long, TrendDirection::Down)
                        | (PositionSide::Short, TrendDirection::Up)
                );
                if against {
                    reasons.push(format!(
                        "Benchmark daily trend is {}, against {} position",
                        trend.label(),
                        side.label()
                    ));
                }
            }
        }

        if opposing.score >= cfg.entry_threshold {
            reasons.push(format!(
                "Opposing {} entry score {:.1} clears entry threshold {:.1}; close the {} position before any reversal",
                match side {
                    PositionSide::Long => Direction::Short,
                    PositionSide::Short => Direction::Long,
                }
                .label(),
                opposing.score,
                cfg.entry_threshold,
                side.label()
            ));
        }

        Recommendation { action, reasons }
    }
}

fn wait(reasons: Vec<String>) -> Recommendation {
    Recommendation {
        action: Action::Wait,
        reasons,
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
