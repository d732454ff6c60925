// =============================================================================
// Ichimoku Cloud (current position, no forward shift)
// =============================================================================
//
//   tenkan   = (highest high + lowest low) / 2 over `tenkan` bars
//   kijun    = same over `kijun` bars
//   senkou_a = (tenkan + kijun) / 2
//   senkou_b = same midpoint over `senkou_b` bars
//
// The cloud is taken at the latest bar rather than projected forward, so the
// comparison is between today's close and today's span values.
// =============================================================================

use serde::Serialize;

/// Ichimoku lines and cloud boundaries at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IchimokuCloud {
    pub tenkan: f64,
    pub kijun: f64,
    pub senkou_a: f64,
    pub senkou_b: f64,
    pub cloud_top: f64,
    pub cloud_bottom: f64,
}

/// Compute the cloud at the latest bar.
///
/// Returns `None` if any window is zero or longer than the input, or any
/// resulting value is non-finite.
pub fn calculate_ichimoku(
    high: &[f64],
    low: &[f64],
    tenkan_len: usize,
    kijun_len: usize,
    senkou_b_len: usize,
) -> Option<IchimokuCloud> {
    let tenkan = latest_midpoint(high, low, tenkan_len)?;
    let kijun = latest_midpoint(high, low, kijun_len)?;
    let senkou_b = latest_midpoint(high, low, senkou_b_len)?;
    let senkou_a = (tenkan + kijun) / 2.0;

    let cloud = IchimokuCloud {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
        cloud_top: senkou_a.max(senkou_b),
        cloud_bottom: senkou_a.min(senkou_b),
    };

    [
        cloud.tenkan,
        cloud.kijun,
        cloud.senkou_a,
        cloud.senkou_b,
        cloud.cloud_top,
        cloud.cloud_bottom,
    ]
    .iter()
    .all(|v| v.is_finite())
    .then_some(cloud)
}

/// `(max(high) + min(low)) / 2` over the trailing `window` bars.
fn latest_midpoint(high: &[f64], low: &[f64], window: usize) -> Option<f64> {
    let n = high.len().min(low.len());
    if window == 0 || n < window {
        return None;
    }

    let highest = high[n - window..n].iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = low[n - window..n].iter().copied().fold(f64::INFINITY, f64::min);
    Some((highest + lowest) / 2.0)
}
