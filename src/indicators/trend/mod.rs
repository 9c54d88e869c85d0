//! Trend indicators: EMA and trend direction

pub mod direction;
pub mod ema;

pub use direction::*;
pub use ema::*;
