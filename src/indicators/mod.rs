//! Technical indicators and the enrichment engine.

pub mod engine;
pub mod error;
pub mod validation;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use engine::IndicatorEngine;
pub use error::IndicatorError;
pub use validation::*;
