// =============================================================================
// Heiken-Ashi and Smoothed Heiken-Ashi
// =============================================================================
//
// Heiken-Ashi replaces each bar with a synthetic candle:
//
//   ha_close_i = (O_i + H_i + L_i + C_i) / 4
//   ha_open_0  = (O_0 + C_0) / 2
//   ha_open_i  = (ha_open_{i-1} + ha_close_{i-1}) / 2
//
// The open is a first-order recurrence, so it is replayed from the first bar.
//
// The smoothed variant runs the same recurrence on EMA-smoothed OHLC (span
// `len1`) and then smooths the resulting open/close again (span `len2`).
// =============================================================================

use super::ema::calculate_ema;

/// Synthetic open/close series, one element per input bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HeikenAshiSeries {
    pub open: Vec<f64>,
    pub close: Vec<f64>,
}

impl HeikenAshiSeries {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// `(open, close)` of the most recent candle.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.open.last()?, *self.close.last()?))
    }
}

/// Compute Heiken-Ashi open/close from raw OHLC slices.
///
/// The slices are truncated to the shortest of the four.  Returns empty
/// series for empty input.
pub fn calculate_heiken_ashi(
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> HeikenAshiSeries {
    let n = open.len().min(high.len()).min(low.len()).min(close.len());

    let ha_close: Vec<f64> = (0..n)
        .map(|i| (open[i] + high[i] + low[i] + close[i]) / 4.0)
        .collect();

    let ha_open: Vec<f64> = match n {
        0 => Vec::new(),
        _ => {
            let seed = (open[0] + close[0]) / 2.0;
            std::iter::once(seed)
                .chain(ha_close[..n - 1].iter().scan(seed, |prev_open, &prev_close| {
                    *prev_open = (*prev_open + prev_close) / 2.0;
                    Some(*prev_open)
                }))
                .collect()
        }
    };

    HeikenAshiSeries {
        open: ha_open,
        close: ha_close,
    }
}

/// Compute the two-stage smoothed Heiken-Ashi open/close.
///
/// 1. EMA(`len1`) of open, high, low, close independently.
/// 2. Heiken-Ashi recurrence on the smoothed bars.
/// 3. EMA(`len2`) of the resulting open and close.
///
/// Returns empty series when either span is zero or the input is empty.
pub fn calculate_smoothed_heiken_ashi(
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
    len1: usize,
    len2: usize,
) -> HeikenAshiSeries {
    let smoothed = calculate_heiken_ashi(
        &calculate_ema(open, len1),
        &calculate_ema(high, len1),
        &calculate_ema(low, len1),
        &calculate_ema(close, len1),
    );

    if smoothed.is_empty() {
        return smoothed;
    }

    HeikenAshiSeries {
        open: calculate_ema(&smoothed.open, len2),
        close: calculate_ema(&smoothed.close, len2),
    }
}
