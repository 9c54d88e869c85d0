//! Engine-level error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::indicators::IndicatorError;

/// Contract violations surfaced by the engine.
///
/// Insufficient history never produces an error; these variants are reserved
/// for inputs the caller must never send.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid market context: {0}")]
    InvalidMarketContext(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
