use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::signals::categories::RuleCategory;

/// Entry direction being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }
}

/// Outcome of a single rule. Unmet rules contribute zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub condition: String,
    pub met: bool,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalSignal {
    pub direction: Direction,
    pub score: f64,
    pub reasons: Vec<String>,
    pub types: BTreeSet<RuleCategory>,
    pub details: Vec<ScoreDetail>,
}

impl DirectionalSignal {
    /// A signal with no met rules.
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            score: 0.0,
            reasons: Vec::new(),
            types: BTreeSet::new(),
            details: Vec::new(),
        }
    }

    pub fn is_met(&self, condition: &str) -> bool {
        self.details.iter().any(|d| d.met && d.condition == condition)
    }
}
