use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// +1 for long, -1 for short.
    pub fn sign(self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PositionSide::Long => "long",
            PositionSide::Short => "short",
        }
    }
}

/// Snapshot of an open position. Absent entirely when flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInfo {
    pub side: PositionSide,
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidation_price: Option<f64>,
}

impl PositionInfo {
    pub fn new(side: PositionSide, entry_price: f64) -> Self {
        Self {
            side,
            entry_price,
            liquidation_price: None,
        }
    }

    pub fn with_liquidation_price(mut self, price: f64) -> Self {
        self.liquidation_price = Some(price);
        self
    }

    /// Signed percentage move from entry, positive when in the position's favour.
    pub fn pnl_pct(&self, price: f64) -> f64 {
        (price - self.entry_price) / self.entry_price * 100.0 * self.side.sign()
    }

    /// Rejects positions the caller should never have produced.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.entry_price.is_finite() || self.entry_price <= 0.0 {
            return Err(EngineError::InvalidPosition(format!(
                "entry price must be finite and positive, got {}",
                self.entry_price
            )));
        }
        if let Some(liq) = self.liquidation_price {
            if !liq.is_finite() {
                return Err(EngineError::InvalidPosition(format!(
                    "liquidation price must be finite, got {}",
                    liq
                )));
            }
        }
        Ok(())
    }
}

/// Current exposure, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    Flat,
    Long,
    Short,
}

impl PositionState {
    pub fn of(position: Option<&PositionInfo>) -> Self {
        match position.map(|p| p.side) {
            None => PositionState::Flat,
            Some(PositionSide::Long) => PositionState::Long,
            Some(PositionSide::Short) => PositionState::Short,
        }
    }

    pub fn side(self) -> Option<PositionSide> {
        match self {
            PositionState::Flat => None,
            PositionState::Long => Some(PositionSide::Long),
            PositionState::Short => Some(PositionSide::Short),
        }
    }
}
