// =============================================================================
// Hull Moving Average (HMA)
// =============================================================================
//
// Low-lag average built from a cascade of weighted moving averages:
//
//   raw  = 2 * WMA(x, n / 2) - WMA(x, n)
//   HMA  = WMA(raw, round(sqrt(n)))
//
// Both inner windows are floored at 1.
// =============================================================================

use super::wma::calculate_wma;

/// Compute the HMA series of `values` for `period`.
///
/// The first output element corresponds to input index
/// `period + round(sqrt(period)) - 2`.  Returns an empty vec when `period` is
/// zero or the input is too short to produce a single value.
pub fn calculate_hma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let half = (period / 2).max(1);
    let sqrt_len = ((period as f64).sqrt().round() as usize).max(1);

    let wma_half = calculate_wma(values, half);
    let wma_full = calculate_wma(values, period);

    // wma_half starts at input index half-1, wma_full at period-1.
    let offset = period - half;
    let raw: Vec<f64> = wma_full
        .iter()
        .zip(&wma_half[offset..])
        .map(|(&full, &half)| 2.0 * half - full)
        .collect();

    calculate_wma(&raw, sqrt_len)
}
