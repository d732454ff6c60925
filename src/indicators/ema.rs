// =============================================================================
// Exponential Moving Average (EMA) — recursive form
// =============================================================================
//
// EMA gives more weight to recent prices.  This is the recursive variant
// seeded with the first observation, so the output is as long as the input:
//
//   alpha  = 2 / (span + 1)
//   EMA_0  = x_0
//   EMA_t  = alpha * x_t + (1 - alpha) * EMA_{t-1}
// =============================================================================

/// Compute the EMA series of `values` for the given `span`.
///
/// Returns one value per input element.
///
/// # Edge cases
/// - `span == 0` => empty vec
/// - empty input => empty vec
/// - A non-finite intermediate value truncates the series.
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    values
        .iter()
        .scan(None::<f64>, |prev, &x| {
            let ema = match *prev {
                None => x,
                Some(p) => alpha * x + (1.0 - alpha) * p,
            };
            if !ema.is_finite() {
                return None;
            }
            *prev = Some(ema);
            Some(ema)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0], 3);
        assert_eq!(ema.len(), 3);
        assert!((ema[0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn ema_known_values() {
        // span 3 => alpha = 0.5
        let ema = calculate_ema(&[10.0, 20.0, 30.0], 3);
        assert!((ema[1] - 15.0).abs() < 1e-12);
        assert!((ema[2] - 22.5).abs() < 1e-12);
    }

    #[test]
    fn ema_span_one_is_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let ema = calculate_ema(&values, 1);
        for (a, b) in ema.iter().zip(values.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn ema_constant_series_is_constant() {
        let ema = calculate_ema(&[7.0; 50], 10);
        assert!(ema.iter().all(|v| (v - 7.0).abs() < 1e-12));
    }

    #[test]
    fn ema_handles_nan_in_input() {
        let ema = calculate_ema(&[1.0, 2.0, f64::NAN, 4.0], 3);
        // NaN poisons the recursion => stop at the last finite value.
        assert_eq!(ema.len(), 2);
    }
}
