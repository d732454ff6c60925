// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Price changes (deltas) from consecutive source values.
// Step 2 — Seed average gain / average loss with the SMA of the first
//          `period` gains / losses.
// Step 3 — Wilder's smoothing:
//            avg = (prev_avg * (period - 1) + current) / period
// Step 4 — RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//
// The confluence pipeline feeds OHLC4 rather than raw closes.
// =============================================================================

/// Compute the RSI series for `source` and `period`.
///
/// One RSI value per source element starting at index `period`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `source.len() < period + 1` => empty vec
/// - No movement at all => 50.0; only gains => 100.0; only losses => 0.0.
/// - A non-finite result truncates the series.
pub fn calculate_rsi(source: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || source.len() < period + 1 {
        return Vec::new();
    }

    let split = |d: f64| (d.max(0.0), (-d).max(0.0));
    let moves: Vec<(f64, f64)> = source.windows(2).map(|w| split(w[1] - w[0])).collect();

    let period_f = period as f64;
    let (seed_gain, seed_loss) = moves[..period]
        .iter()
        .fold((0.0, 0.0), |(g, l), &(gain, loss)| (g + gain, l + loss));
    let mut avg_gain = seed_gain / period_f;
    let mut avg_loss = seed_loss / period_f;

    let mut result = Vec::with_capacity(moves.len() - period + 1);
    match rsi_from_averages(avg_gain, avg_loss) {
        Some(rsi) => result.push(rsi),
        None => return result,
    }

    for &(gain, loss) in &moves[period..] {
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        match rsi_from_averages(avg_gain, avg_loss) {
            Some(rsi) => result.push(rsi),
            None => break,
        }
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    rsi.is_finite().then_some(rsi)
}
