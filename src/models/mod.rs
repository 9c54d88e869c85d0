//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod position;
pub mod recommendation;
pub mod signal;
pub mod snapshot;

pub use indicators::{Candle, EnrichedCandle, IndicatorValues};
pub use market::{MarketContext, TrendDirection, TrendReading};
pub use position::{PositionInfo, PositionSide, PositionState};
pub use recommendation::{Action, HoldabilityAssessment, Recommendation};
pub use signal::{Direction, DirectionalSignal, ScoreDetail};
pub use snapshot::{Evaluation, MarketSnapshot};
