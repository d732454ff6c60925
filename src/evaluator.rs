// =============================================================================
// Evaluator — bar series in, confluence result out
// =============================================================================
//
// Pipeline:
//   1. Minimum-lookback guard (longest window + warm-up)
//   2. HMA slope
//   3. Heiken-Ashi
//   4. Smoothed Heiken-Ashi
//   5. RSI on OHLC4
//   6. ADX momentum
//   7. Ichimoku cloud position
//   8. Confluence counts
//
// The first failing step ends the evaluation; there is no partial result.
// Evaluation is pure: no IO, no shared state, same input => same output.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::config::{IndicatorConfig, KIJUN_LENGTH, SENKOU_B_LENGTH};
use crate::error::{ConfigError, EvaluationError, IndicatorError};
use crate::indicators::{AdxOutput, IchimokuCloud};
use crate::market_data::BarSeries;
use crate::signals::classifier;
use crate::signals::{aggregate, classify, ConfluenceCounts, IndicatorSignals, Rating};

/// Raw indicator readings at the latest bar, kept for detail display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub hma: f64,
    pub rsi: f64,
    pub adx: AdxOutput,
    pub ichimoku: IchimokuCloud,
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfluenceResult {
    pub bull_count: u8,
    pub bear_count: u8,
    /// Last close of the series.
    pub reference_price: f64,
    pub signals: IndicatorSignals,
    pub snapshot: IndicatorSnapshot,
}

impl ConfluenceResult {
    pub fn rating(&self) -> Rating {
        classify(ConfluenceCounts {
            bull: self.bull_count,
            bear: self.bear_count,
        })
    }
}

/// Either a result or the reason there is none.
pub type EvaluationOutcome = Result<ConfluenceResult, EvaluationError>;

/// Validated indicator configuration, ready to evaluate any number of series.
///
/// `Copy` and free of interior state, so each worker can hold its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    config: IndicatorConfig,
}

impl Evaluator {
    /// Reject invalid lengths up front.
    pub fn new(config: IndicatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Bars required before the calculators run.
    pub fn min_rows(&self) -> usize {
        self.config.min_rows()
    }

    /// Run the full pipeline over `series`.
    pub fn evaluate(&self, series: &BarSeries) -> EvaluationOutcome {
        let cfg = &self.config;
        let last_close = series.last_close().unwrap_or(0.0);

        let required = cfg.min_rows();
        if series.len() < required {
            return Err(EvaluationError::InsufficientData {
                got: series.len(),
                required,
                last_close,
            });
        }

        let fail = |source: IndicatorError| EvaluationError::Indicator { source, last_close };

        let (hma, hma_last) = classifier::hma_signal(series, cfg.hma_length).map_err(fail)?;
        let heiken_ashi = classifier::heiken_ashi_signal(series).map_err(fail)?;
        let smoothed_heiken_ashi =
            classifier::smoothed_heiken_ashi_signal(series, cfg.smoothed_ha_len1, cfg.smoothed_ha_len2)
                .map_err(fail)?;
        let (rsi, rsi_value) = classifier::rsi_signal(series, cfg.rsi_length).map_err(fail)?;
        let (adx_momentum, adx) =
            classifier::adx_momentum(series, cfg.adx_length, cfg.adx_threshold).map_err(fail)?;
        let (ichimoku, cloud) = classifier::ichimoku_signal(
            series,
            cfg.ichimoku_tenkan_length,
            KIJUN_LENGTH,
            SENKOU_B_LENGTH,
        )
        .map_err(fail)?;

        let signals = IndicatorSignals {
            hma,
            heiken_ashi,
            smoothed_heiken_ashi,
            rsi,
            ichimoku,
            adx_momentum,
        };
        let counts = aggregate(&signals);

        debug!(
            bars = series.len(),
            bull = counts.bull,
            bear = counts.bear,
            price = last_close,
            "confluence evaluated"
        );

        Ok(ConfluenceResult {
            bull_count: counts.bull,
            bear_count: counts.bear,
            reference_price: last_close,
            signals,
            snapshot: IndicatorSnapshot {
                hma: hma_last,
                rsi: rsi_value,
                adx,
                ichimoku: cloud,
            },
        })
    }
}
