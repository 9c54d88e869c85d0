//! Volume indicators: VWAP, volume moving average

pub mod vma;
pub mod vwap;

pub use vma::*;
pub use vwap::*;
