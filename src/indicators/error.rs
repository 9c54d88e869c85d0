use thiserror::Error;

/// Candle data the caller must never supply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("candle {index} has non-finite {field}: {value}")]
    NonFinite {
        index: usize,
        field: &'static str,
        value: f64,
    },
}
