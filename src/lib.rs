//! Perp position advisor: indicator enrichment, entry scoring, holdability
//! scoring and the recommendation decision function.

pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod signals;

pub use config::EngineConfig;
pub use error::EngineError;
pub use signals::engine::SignalEngine;
