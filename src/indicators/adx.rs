// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. +DM / -DM and True Range per bar transition.
//   2. Wilder's running sums of +DM, -DM and TR over `period`.
//   3. +DI = 100 * sum(+DM) / sum(TR),  -DI = 100 * sum(-DM) / sum(TR)
//   4. DX  = 100 * |+DI - -DI| / (+DI + -DI)
//   5. ADX = SMA-seeded Wilder average of DX over `period`.
// =============================================================================

use serde::Serialize;

use crate::market_data::Bar;

/// Latest ADX reading with the directional indices it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdxOutput {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

/// Compute the most recent ADX reading from `bars` (oldest first).
///
/// Returns `None` when:
/// - `period` is zero.
/// - There are fewer than `2 * period + 1` bars (`period` transitions for the
///   initial sums, `period` DX values to seed the average, one bar with no
///   predecessor).
/// - True range sums to zero (no price movement at all) or any intermediate
///   value is non-finite.
pub fn calculate_adx(bars: &[Bar], period: usize) -> Option<AdxOutput> {
    if period == 0 || bars.len() < 2 * period + 1 {
        return None;
    }

    let period_f = period as f64;
    let moves: Vec<DirectionalMove> = bars
        .windows(2)
        .map(|w| DirectionalMove::between(&w[0], &w[1]))
        .collect();

    // Initial running sums over the first `period` transitions.
    let mut sums = moves[..period]
        .iter()
        .fold(DirectionalMove::default(), |acc, m| acc.accumulate(m));

    let mut latest = directional_indices(&sums)?;
    let mut dx_values = Vec::with_capacity(moves.len() - period + 1);
    dx_values.push(latest.dx);

    for m in &moves[period..] {
        sums = DirectionalMove {
            plus_dm: sums.plus_dm - sums.plus_dm / period_f + m.plus_dm,
            minus_dm: sums.minus_dm - sums.minus_dm / period_f + m.minus_dm,
            true_range: sums.true_range - sums.true_range / period_f + m.true_range,
        };
        latest = directional_indices(&sums)?;
        dx_values.push(latest.dx);
    }

    if dx_values.len() < period {
        return None;
    }

    let seed = dx_values[..period].iter().sum::<f64>() / period_f;
    let adx = dx_values[period..]
        .iter()
        .fold(seed, |adx, &dx| (adx * (period_f - 1.0) + dx) / period_f);

    adx.is_finite().then_some(AdxOutput {
        adx,
        plus_di: latest.plus_di,
        minus_di: latest.minus_di,
    })
}

// =============================================================================
// Internal helpers
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct DirectionalMove {
    plus_dm: f64,
    minus_dm: f64,
    true_range: f64,
}

impl DirectionalMove {
    fn between(prev: &Bar, bar: &Bar) -> Self {
        let true_range = (bar.high - bar.low)
            .max((bar.high - prev.close).abs())
            .max((bar.low - prev.close).abs());

        let up_move = bar.high - prev.high;
        let down_move = prev.low - bar.low;

        Self {
            plus_dm: if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            },
            minus_dm: if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            },
            true_range,
        }
    }

    fn accumulate(self, other: &Self) -> Self {
        Self {
            plus_dm: self.plus_dm + other.plus_dm,
            minus_dm: self.minus_dm + other.minus_dm,
            true_range: self.true_range + other.true_range,
        }
    }
}

struct Indices {
    plus_di: f64,
    minus_di: f64,
    dx: f64,
}

/// Derive +DI, -DI and DX from smoothed sums.
///
/// `None` if the smoothed true range is zero or the result is non-finite.
fn directional_indices(sums: &DirectionalMove) -> Option<Indices> {
    if sums.true_range == 0.0 {
        return None;
    }

    let plus_di = 100.0 * sums.plus_dm / sums.true_range;
    let minus_di = 100.0 * sums.minus_dm / sums.true_range;
    let di_sum = plus_di + minus_di;

    let dx = if di_sum == 0.0 {
        0.0
    } else {
        100.0 * (plus_di - minus_di).abs() / di_sum
    };

    (dx.is_finite() && plus_di.is_finite() && minus_di.is_finite()).then_some(Indices {
        plus_di,
        minus_di,
        dx,
    })
}
