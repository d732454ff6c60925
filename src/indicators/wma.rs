// =============================================================================
// Weighted Moving Average (WMA)
// =============================================================================
//
// Linearly weighted: the oldest value in the window has weight 1, the most
// recent has weight `period`.
//
//   WMA_t = sum_{k=1..period} k * x_{t-period+k} / (period * (period + 1) / 2)
// =============================================================================

/// Compute the WMA series for `values` and look-back `period`.
///
/// Each output element corresponds to an input starting at index
/// `period - 1`; the result has `values.len() - period + 1` elements.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `values.len() < period` => empty vec
pub fn calculate_wma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let denominator = (period * (period + 1)) as f64 / 2.0;

    values
        .windows(period)
        .map(|window| {
            let weighted: f64 = window
                .iter()
                .enumerate()
                .map(|(k, &x)| (k + 1) as f64 * x)
                .sum();
            weighted / denominator
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wma_insufficient_data() {
        assert!(calculate_wma(&[1.0, 2.0], 3).is_empty());
        assert!(calculate_wma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn wma_known_values() {
        // window [1,2,3] => (1*1 + 2*2 + 3*3) / 6 = 14/6
        let wma = calculate_wma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(wma.len(), 2);
        assert!((wma[0] - 14.0 / 6.0).abs() < 1e-12);
        assert!((wma[1] - 20.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn wma_period_one_is_identity() {
        let wma = calculate_wma(&[5.0, 6.0, 7.0], 1);
        assert_eq!(wma, vec![5.0, 6.0, 7.0]);
    }
}
