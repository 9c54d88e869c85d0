//! Rule categories reported on every scored rule.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Momentum,
    Trend,
    Volatility,
    Volume,
    Pnl,
    Risk,
    Benchmark,
}

impl RuleCategory {
    pub fn all() -> Vec<RuleCategory> {
        vec![
            RuleCategory::Momentum,
            RuleCategory::Trend,
            RuleCategory::Volatility,
            RuleCategory::Volume,
            RuleCategory::Pnl,
            RuleCategory::Risk,
            RuleCategory::Benchmark,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleCategory::Momentum => "Momentum",
            RuleCategory::Trend => "Trend",
            RuleCategory::Volatility => "Volatility",
            RuleCategory::Volume => "Volume",
            RuleCategory::Pnl => "PnL",
            RuleCategory::Risk => "Risk",
            RuleCategory::Benchmark => "Benchmark",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
