//! Table-driven rule batteries.
//!
//! A rule is an independent predicate with a fixed weight, condition text and
//! category. Predicates return `None` when an input they need is absent, which
//! is scored exactly like `Some(false)`.

use std::collections::BTreeSet;
use std::fmt;

use crate::models::signal::ScoreDetail;
use crate::signals::categories::RuleCategory;

pub type Predicate<C> = Box<dyn Fn(&C) -> Option<bool> + Send + Sync>;

pub struct Rule<C> {
    pub id: &'static str,
    pub condition: String,
    pub category: RuleCategory,
    pub weight: f64,
    predicate: Predicate<C>,
}

impl<C> Rule<C> {
    pub fn new(
        id: &'static str,
        condition: impl Into<String>,
        category: RuleCategory,
        weight: f64,
        predicate: impl Fn(&C) -> Option<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            condition: condition.into(),
            category,
            weight,
            predicate: Box::new(predicate),
        }
    }

    pub fn is_met(&self, ctx: &C) -> bool {
        (self.predicate)(ctx).unwrap_or(false)
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("condition", &self.condition)
            .field("category", &self.category)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Result of a single rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub id: &'static str,
    pub category: RuleCategory,
    pub detail: ScoreDetail,
}

/// Aggregated results of one pass over a rule book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEvaluation {
    pub outcomes: Vec<RuleOutcome>,
}

impl RuleEvaluation {
    /// Sum of contributed weights.
    pub fn score(&self) -> f64 {
        self.outcomes.iter().map(|o| o.detail.weight).sum()
    }

    pub fn reasons(&self) -> Vec<String> {
        self.met().map(|o| o.detail.condition.clone()).collect()
    }

    pub fn categories(&self) -> BTreeSet<RuleCategory> {
        self.met().map(|o| o.category).collect()
    }

    pub fn details(&self) -> Vec<ScoreDetail> {
        self.outcomes.iter().map(|o| o.detail.clone()).collect()
    }

    pub fn is_met(&self, id: &str) -> bool {
        self.met().any(|o| o.id == id)
    }

    fn met(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.detail.met)
    }
}

#[derive(Debug)]
pub struct RuleBook<C> {
    rules: Vec<Rule<C>>,
}

impl<C> RuleBook<C> {
    pub fn new(rules: Vec<Rule<C>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    /// Evaluate every rule in definition order.
    pub fn evaluate(&self, ctx: &C) -> RuleEvaluation {
        let outcomes = self
            .rules
            .iter()
            .map(|rule| Self::outcome(rule, rule.is_met(ctx)))
            .collect();
        RuleEvaluation { outcomes }
    }

    /// Every rule listed as unmet; used when there is nothing to evaluate.
    pub fn unmet(&self) -> RuleEvaluation {
        let outcomes = self.rules.iter().map(|rule| Self::outcome(rule, false)).collect();
        RuleEvaluation { outcomes }
    }

    fn outcome(rule: &Rule<C>, met: bool) -> RuleOutcome {
        RuleOutcome {
            id: rule.id,
            category: rule.category,
            detail: ScoreDetail {
                condition: rule.condition.clone(),
                met,
                weight: if met { rule.weight } else { 0.0 },
            },
        }
    }
}
