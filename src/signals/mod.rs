//! Signal evaluation: entry scoring, holdability and the recommendation engine.

pub mod categories;
pub mod decision;
pub mod engine;
pub mod holdability;
pub mod rules;
pub mod scoring;

pub use categories::*;
pub use decision::RecommendationEngine;
pub use holdability::HoldabilityScorer;
pub use rules::{Rule, RuleBook, RuleEvaluation, RuleOutcome};
pub use scoring::SignalScorer;
