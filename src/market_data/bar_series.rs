use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV bar.  `timestamp` is the bar open time in epoch
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    /// `(open + high + low + close) / 4`.
    pub fn ohlc4(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }
}

// ---------------------------------------------------------------------------
// BarSeries -- validated, chronologically ordered bars
// ---------------------------------------------------------------------------

/// Chronologically ordered bars for one symbol and interval.
///
/// Every numeric field is finite and timestamps are strictly increasing; both
/// are checked once at construction so the indicator code can assume clean
/// input.  The series is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate and wrap `bars` (oldest first).
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ];
            if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(SeriesError::NonFinite { index, field });
            }
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(SeriesError::OutOfOrder {
                        index,
                        timestamp: bar.timestamp,
                        previous,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close of the most recent bar, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Open time of the most recent bar, if any.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.bars.last().map(|b| b.timestamp)
    }

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Per-bar `(O + H + L + C) / 4`.
    pub fn ohlc4(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::ohlc4).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
