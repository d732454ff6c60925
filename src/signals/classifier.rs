// =============================================================================
// Signal Classifier — one calculator in, one directional verdict out
// =============================================================================
//
// Each function runs a single indicator over the bar series and maps its
// latest output onto a `Signal` (or, for ADX, a momentum flag).  Undefined
// output becomes an `IndicatorError` naming the indicator so the evaluator
// can stop at the first failure.

use tracing::debug;

use crate::error::IndicatorError;
use crate::indicators::{
    calculate_adx, calculate_heiken_ashi, calculate_hma, calculate_ichimoku, calculate_rsi,
    calculate_smoothed_heiken_ashi, AdxOutput, IchimokuCloud,
};
use crate::market_data::BarSeries;
use crate::types::{IndicatorKind, Signal};

/// RSI level separating bullish from bearish.
pub const RSI_MIDLINE: f64 = 50.0;

/// Slope of the Hull moving average over its last two values.
///
/// Returns the signal and the latest HMA value.
pub fn hma_signal(series: &BarSeries, length: usize) -> Result<(Signal, f64), IndicatorError> {
    let hma = calculate_hma(&series.closes(), length);
    match hma.as_slice() {
        [.., prev, last] if prev.is_finite() && last.is_finite() => {
            let signal = Signal::from_diff(last - prev);
            debug!(prev, last, %signal, "HMA slope");
            Ok((signal, *last))
        }
        [.., _, _] => Err(IndicatorError::new(IndicatorKind::Hma, "non-finite HMA value")),
        _ => Err(IndicatorError::new(
            IndicatorKind::Hma,
            format!("need 2 HMA values, got {}", hma.len()),
        )),
    }
}

/// Heiken-Ashi candle colour at the latest bar.
pub fn heiken_ashi_signal(series: &BarSeries) -> Result<Signal, IndicatorError> {
    let ha = calculate_heiken_ashi(&series.opens(), &series.highs(), &series.lows(), &series.closes());
    let (open, close) = ha
        .last()
        .ok_or_else(|| IndicatorError::new(IndicatorKind::HeikenAshi, "no Heiken-Ashi candles"))?;
    if !(open.is_finite() && close.is_finite()) {
        return Err(IndicatorError::new(IndicatorKind::HeikenAshi, "non-finite Heiken-Ashi candle"));
    }
    Ok(Signal::from_diff(close - open))
}

/// Smoothed Heiken-Ashi: bullish when the smoothed close is above the
/// smoothed open.
pub fn smoothed_heiken_ashi_signal(
    series: &BarSeries,
    len1: usize,
    len2: usize,
) -> Result<Signal, IndicatorError> {
    let sha = calculate_smoothed_heiken_ashi(
        &series.opens(),
        &series.highs(),
        &series.lows(),
        &series.closes(),
        len1,
        len2,
    );
    let (open, close) = sha.last().ok_or_else(|| {
        IndicatorError::new(IndicatorKind::SmoothedHeikenAshi, "smoothed Heiken-Ashi series is empty")
    })?;
    if !(open.is_finite() && close.is_finite()) {
        return Err(IndicatorError::new(
            IndicatorKind::SmoothedHeikenAshi,
            "non-finite smoothed Heiken-Ashi value",
        ));
    }
    debug!(open, close, "smoothed Heiken-Ashi");
    Ok(Signal::from_diff(close - open))
}

/// Map an RSI value onto a signal around the 50 midline.
pub fn classify_rsi(rsi: f64) -> Signal {
    Signal::from_diff(rsi - RSI_MIDLINE)
}

/// RSI of OHLC4 relative to the midline.
///
/// Returns the signal and the latest RSI value.
pub fn rsi_signal(series: &BarSeries, length: usize) -> Result<(Signal, f64), IndicatorError> {
    rsi_signal_from_source(&series.ohlc4(), length)
}

/// RSI signal over an arbitrary source series.
pub fn rsi_signal_from_source(source: &[f64], length: usize) -> Result<(Signal, f64), IndicatorError> {
    let rsi = *calculate_rsi(source, length).last().ok_or_else(|| {
        IndicatorError::new(
            IndicatorKind::Rsi,
            format!("RSI({length}) undefined for {} values", source.len()),
        )
    })?;
    Ok((classify_rsi(rsi), rsi))
}

/// ADX momentum flag: `adx >= threshold`.
pub fn adx_momentum(
    series: &BarSeries,
    length: usize,
    threshold: usize,
) -> Result<(bool, AdxOutput), IndicatorError> {
    let adx = calculate_adx(series.bars(), length).ok_or_else(|| {
        IndicatorError::new(IndicatorKind::Adx, format!("ADX({length}) undefined"))
    })?;
    let has_momentum = adx.adx >= threshold as f64;
    debug!(adx = adx.adx, threshold, has_momentum, "ADX momentum");
    Ok((has_momentum, adx))
}

/// Position of the latest close relative to the current Ichimoku cloud.
pub fn ichimoku_signal(
    series: &BarSeries,
    tenkan_len: usize,
    kijun_len: usize,
    senkou_b_len: usize,
) -> Result<(Signal, IchimokuCloud), IndicatorError> {
    let cloud = calculate_ichimoku(&series.highs(), &series.lows(), tenkan_len, kijun_len, senkou_b_len)
        .ok_or_else(|| IndicatorError::new(IndicatorKind::Ichimoku, "Ichimoku lines undefined"))?;
    let close = series
        .last_close()
        .filter(|c| c.is_finite())
        .ok_or_else(|| IndicatorError::new(IndicatorKind::Ichimoku, "latest close missing"))?;

    let signal = if close > cloud.cloud_top {
        Signal::Bullish
    } else if close < cloud.cloud_bottom {
        Signal::Bearish
    } else {
        Signal::Neutral
    };
    Ok((signal, cloud))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::Bar;

    fn series_from(prices: &[f64]) -> BarSeries {
        BarSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| Bar {
                    timestamp: i as i64,
                    open: p,
                    high: p,
                    low: p,
                    close: p,
                    volume: 0.0,
                })
                .collect(),
        )
        .unwrap()
    }

    fn ramp(n: usize, step: f64) -> BarSeries {
        let prices: Vec<f64> = (0..n).map(|i| 1000.0 + step * i as f64).collect();
        series_from(&prices)
    }

    #[test]
    fn overflowing_prices_are_reported_as_non_finite() {
        // Finite bars whose weighted sums and OHLC4 overflow to infinity.
        let series = series_from(&[1.7e308; 60]);

        let err = hma_signal(&series, 20).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::Hma);
        assert_eq!(err.message, "non-finite HMA value");

        let err = heiken_ashi_signal(&series).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::HeikenAshi);
        assert!(err.message.contains("non-finite"));

        let err = smoothed_heiken_ashi_signal(&series, 10, 10).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::SmoothedHeikenAshi);
    }

    #[test]
    fn rsi_classification_around_midline() {
        assert_eq!(classify_rsi(60.0), Signal::Bullish);
        assert_eq!(classify_rsi(40.0), Signal::Bearish);
        assert_eq!(classify_rsi(50.0), Signal::Neutral);
    }

    #[test]
    fn rsi_signal_from_constructed_sources() {
        // +3 / -2 => RSI 60
        let (signal, rsi) = rsi_signal_from_source(&[10.0, 13.0, 11.0], 2).unwrap();
        assert!((rsi - 60.0).abs() < 1e-10);
        assert_eq!(signal, Signal::Bullish);

        // +2 / -3 => RSI 40
        let (signal, rsi) = rsi_signal_from_source(&[10.0, 12.0, 9.0], 2).unwrap();
        assert!((rsi - 40.0).abs() < 1e-10);
        assert_eq!(signal, Signal::Bearish);

        // +2 / -2 => RSI 50
        let (signal, rsi) = rsi_signal_from_source(&[10.0, 12.0, 10.0], 2).unwrap();
        assert!((rsi - 50.0).abs() < 1e-10);
        assert_eq!(signal, Signal::Neutral);
    }

    #[test]
    fn rsi_signal_undefined_is_error() {
        let err = rsi_signal_from_source(&[1.0, 2.0], 5).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::Rsi);
    }

    #[test]
    fn hma_signal_follows_trend() {
        assert_eq!(hma_signal(&ramp(80, 1.0), 20).unwrap().0, Signal::Bullish);
        assert_eq!(hma_signal(&ramp(80, -1.0), 20).unwrap().0, Signal::Bearish);
        assert_eq!(hma_signal(&ramp(80, 0.0), 20).unwrap().0, Signal::Neutral);
    }

    #[test]
    fn hma_signal_needs_two_values() {
        // n=4: first value at index 4, so 5 bars give exactly one value.
        let err = hma_signal(&ramp(5, 1.0), 4).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::Hma);
        assert!(hma_signal(&ramp(6, 1.0), 4).is_ok());
    }

    #[test]
    fn heiken_ashi_signal_directions() {
        assert_eq!(heiken_ashi_signal(&ramp(10, 1.0)).unwrap(), Signal::Bullish);
        assert_eq!(heiken_ashi_signal(&ramp(10, -1.0)).unwrap(), Signal::Bearish);
        assert_eq!(heiken_ashi_signal(&ramp(10, 0.0)).unwrap(), Signal::Neutral);
    }

    #[test]
    fn heiken_ashi_signal_empty_series_is_error() {
        let err = heiken_ashi_signal(&BarSeries::default()).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::HeikenAshi);
    }

    #[test]
    fn smoothed_heiken_ashi_signal_directions() {
        assert_eq!(
            smoothed_heiken_ashi_signal(&ramp(60, 1.0), 10, 10).unwrap(),
            Signal::Bullish
        );
        assert_eq!(
            smoothed_heiken_ashi_signal(&ramp(60, -1.0), 10, 10).unwrap(),
            Signal::Bearish
        );
        let err = smoothed_heiken_ashi_signal(&BarSeries::default(), 10, 10).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::SmoothedHeikenAshi);
    }

    #[test]
    fn adx_momentum_threshold_is_inclusive() {
        // Linear ramp => ADX exactly 100.
        let series = ramp(60, 1.0);
        assert!(adx_momentum(&series, 14, 100).unwrap().0);
        assert!(!adx_momentum(&series, 14, 101).unwrap().0);
    }

    #[test]
    fn adx_momentum_undefined_on_flat_prices() {
        let err = adx_momentum(&ramp(60, 0.0), 14, 20).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::Adx);
    }

    #[test]
    fn ichimoku_signal_positions() {
        assert_eq!(ichimoku_signal(&ramp(100, 1.0), 9, 26, 52).unwrap().0, Signal::Bullish);
        assert_eq!(ichimoku_signal(&ramp(100, -1.0), 9, 26, 52).unwrap().0, Signal::Bearish);
        // Flat: close == cloud top == cloud bottom => inside.
        assert_eq!(ichimoku_signal(&ramp(100, 0.0), 9, 26, 52).unwrap().0, Signal::Neutral);
    }

    #[test]
    fn ichimoku_signal_short_series_is_error() {
        let err = ichimoku_signal(&ramp(40, 1.0), 9, 26, 52).unwrap_err();
        assert_eq!(err.indicator, IndicatorKind::Ichimoku);
    }
}
