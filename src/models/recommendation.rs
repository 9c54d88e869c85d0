use serde::{Deserialize, Serialize};
use std::fmt;

use super::signal::ScoreDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    OpenLong,
    OpenShort,
    Hold,
    Close,
    Wait,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::OpenLong => "OPEN LONG",
            Action::OpenShort => "OPEN SHORT",
            Action::Hold => "HOLD",
            Action::Close => "CLOSE",
            Action::Wait => "WAIT",
        };
        f.write_str(label)
    }
}

/// Whether an open position should keep being held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldabilityAssessment {
    pub score: f64,
    pub details: Vec<ScoreDetail>,
    /// Liquidation price sits inside the configured safety margin.
    pub liquidation_risk: bool,
}

impl HoldabilityAssessment {
    pub fn new(score: f64, details: Vec<ScoreDetail>) -> Self {
        Self {
            score,
            details,
            liquidation_risk: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub reasons: Vec<String>,
}
