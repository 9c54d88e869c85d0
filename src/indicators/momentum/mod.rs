//! Momentum indicators: Stochastic oscillator

pub mod stochastic;

pub use stochastic::*;
