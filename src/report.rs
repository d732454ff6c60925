// =============================================================================
// Scan Report — ranked results plus the per-symbol failure log
// =============================================================================
//
// Ordering: label (BUY, SELL, NEUTRAL), then stars descending, then symbol
// ascending.  Only entries at or above the configured star threshold are
// shown; failures are always listed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::evaluator::ConfluenceResult;
use crate::signals::{IndicatorSignals, Rating};

/// One successfully evaluated symbol.
#[derive(Debug, Clone, Serialize)]
pub struct RatedSymbol {
    pub symbol: String,
    pub rating: Rating,
    pub result: ConfluenceResult,
    /// Open time of the last bar evaluated (epoch ms).
    pub last_timestamp: Option<i64>,
}

/// Why a symbol produced no rating.
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub symbol: String,
    /// "Data", "InsufficientData", an indicator name, or "Task".
    pub kind: String,
    pub message: String,
    /// Last known close, 0.0 when unknown.
    pub last_close: f64,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub rated: Vec<RatedSymbol>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Entries with a BUY/SELL label and at least `min_rating` stars, in
    /// report order.
    pub fn ranked(&self, min_rating: u8) -> Vec<&RatedSymbol> {
        let mut shown: Vec<&RatedSymbol> = self
            .rated
            .iter()
            .filter(|r| r.rating.stars >= min_rating && r.rating.stars > 0)
            .collect();
        shown.sort_by(|a, b| {
            a.rating
                .label
                .cmp(&b.rating.label)
                .then_with(|| b.rating.stars.cmp(&a.rating.stars))
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        shown
    }

    /// Failures sorted by symbol.
    pub fn sorted_failures(&self) -> Vec<&ScanFailure> {
        let mut failures: Vec<&ScanFailure> = self.failures.iter().collect();
        failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        failures
    }

    /// Plain-text rendering for the terminal.
    pub fn render(&self, min_rating: u8) -> String {
        let ranked = self.ranked(min_rating);
        let mut lines = Vec::with_capacity(ranked.len() + self.failures.len() + 4);

        lines.push(format!(
            "Signals ({} of {} evaluated, >= {} stars)",
            ranked.len(),
            self.rated.len(),
            min_rating
        ));
        if ranked.is_empty() {
            lines.push("  none".to_string());
        }
        for r in &ranked {
            lines.push(format!(
                "  {:<7} {:<6} {:<12} {:>14.6}  bull {} / bear {}  {}",
                r.rating.label.to_string(),
                r.rating.stars_text(),
                r.symbol,
                r.result.reference_price,
                r.result.bull_count,
                r.result.bear_count,
                format_timestamp(r.last_timestamp),
            ));
            lines.push(format!("          {}", format_breakdown(&r.result.signals)));
        }

        if !self.failures.is_empty() {
            lines.push(format!("Errors ({})", self.failures.len()));
            for f in self.sorted_failures() {
                lines.push(format!(
                    "  {:<12} [{}] {} (last close {:.6})",
                    f.symbol, f.kind, f.message, f.last_close
                ));
            }
        }

        lines.join("\n")
    }
}

/// "HMA +1  HA +1  SHA 0  RSI -1  ADX on  Ichimoku +1"
fn format_breakdown(signals: &IndicatorSignals) -> String {
    signals
        .entries()
        .iter()
        .map(|(kind, verdict)| format!("{} {verdict}", kind.name()))
        .collect::<Vec<_>>()
        .join("  ")
}

fn format_timestamp(ms: Option<i64>) -> String {
    ms.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
