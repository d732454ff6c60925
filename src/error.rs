// =============================================================================
// Error types
// =============================================================================
//
// Domain errors are typed so the scanner can tell a recoverable per-symbol
// failure from a fatal configuration problem.  Application edges (file IO,
// bar sources, main) wrap these in `anyhow`.

use thiserror::Error;

use crate::types::IndicatorKind;

/// Malformed bar data rejected when building a `BarSeries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar {index}: non-finite {field} value")]
    NonFinite { index: usize, field: &'static str },

    #[error("bar {index}: timestamp {timestamp} does not follow {previous}")]
    OutOfOrder {
        index: usize,
        timestamp: i64,
        previous: i64,
    },
}

/// A single indicator calculator failed or produced undefined output.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{indicator} calculation failed: {message}")]
pub struct IndicatorError {
    pub indicator: IndicatorKind,
    pub message: String,
}

impl IndicatorError {
    pub fn new(indicator: IndicatorKind, message: impl Into<String>) -> Self {
        Self {
            indicator,
            message: message.into(),
        }
    }
}

/// Why one symbol's evaluation produced no result.
///
/// Both variants are recoverable: the caller skips the symbol.  Each carries
/// the last close price so a report can still show something.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("not enough data ({got}/{required})")]
    InsufficientData {
        got: usize,
        required: usize,
        last_close: f64,
    },

    #[error("{source}")]
    Indicator {
        source: IndicatorError,
        last_close: f64,
    },
}

impl EvaluationError {
    /// Best-effort last close price for display fallback.
    pub fn last_close(&self) -> f64 {
        match self {
            Self::InsufficientData { last_close, .. } | Self::Indicator { last_close, .. } => {
                *last_close
            }
        }
    }

    /// Short tag for reports ("InsufficientData", "HMA", "RSI", ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "InsufficientData",
            Self::Indicator { source, .. } => source.indicator.name(),
        }
    }
}

/// Invalid configuration.  Fatal to the run, raised before any evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be >= 1 (got {value})")]
    InvalidLength { name: &'static str, value: usize },

    #[error("min_rating must be 5 or 6 (got {0})")]
    InvalidMinRating(u8),

    #[error("no symbols configured")]
    NoSymbols,
}
