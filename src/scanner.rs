// =============================================================================
// Scanner — evaluate many symbols concurrently
// =============================================================================
//
// One blocking task per symbol: fetch bars, evaluate, rate.  Tasks own their
// bar series; the only shared values are the source (behind `Arc`) and the
// `Copy` evaluator.  A failing or panicking symbol is logged and recorded in
// the report without touching the others.
// =============================================================================

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::EvaluationError;
use crate::evaluator::Evaluator;
use crate::market_data::BarSource;
use crate::report::{RatedSymbol, ScanFailure, ScanReport};

/// Fetch, evaluate and rate a single symbol.  Synchronous; safe to call from
/// any thread.
pub fn scan_symbol(
    source: &dyn BarSource,
    symbol: &str,
    interval: &str,
    evaluator: &Evaluator,
) -> Result<RatedSymbol, ScanFailure> {
    let series = source.fetch(symbol, interval).map_err(|e| ScanFailure {
        symbol: symbol.to_string(),
        kind: "Data".to_string(),
        message: format!("{e:#}"),
        last_close: 0.0,
    })?;

    match evaluator.evaluate(&series) {
        Ok(result) => {
            let rating = result.rating();
            debug!(
                symbol,
                label = %rating.label,
                stars = rating.stars,
                bull = result.bull_count,
                bear = result.bear_count,
                "symbol rated"
            );
            Ok(RatedSymbol {
                symbol: symbol.to_string(),
                rating,
                result,
                last_timestamp: series.last_timestamp(),
            })
        }
        Err(e) => Err(evaluation_failure(symbol, &e)),
    }
}

fn evaluation_failure(symbol: &str, e: &EvaluationError) -> ScanFailure {
    ScanFailure {
        symbol: symbol.to_string(),
        kind: e.tag().to_string(),
        message: e.to_string(),
        last_close: e.last_close(),
    }
}

fn task_failure(symbol: &str, message: &str) -> ScanFailure {
    ScanFailure {
        symbol: symbol.to_string(),
        kind: "Task".to_string(),
        message: message.to_string(),
        last_close: 0.0,
    }
}

/// Scan every symbol in `symbols` and collect the report.
///
/// Must be called from within a tokio runtime.
pub async fn run_scan(
    source: Arc<dyn BarSource>,
    symbols: &[String],
    interval: &str,
    evaluator: Evaluator,
) -> ScanReport {
    info!(symbols = symbols.len(), interval, min_rows = evaluator.min_rows(), "scan starting");

    let mut tasks = JoinSet::new();
    for symbol in symbols {
        let source = Arc::clone(&source);
        let symbol = symbol.clone();
        let interval = interval.to_string();
        tasks.spawn_blocking(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                scan_symbol(source.as_ref(), &symbol, &interval, &evaluator)
            }))
            .unwrap_or_else(|_| Err(task_failure(&symbol, "evaluation panicked")));
            (symbol, outcome)
        });
    }

    // Symbols whose task has not reported back yet.
    let mut pending: Vec<String> = symbols.to_vec();
    let mut lost = None;

    let mut report = ScanReport::default();
    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok((symbol, outcome)) => {
                if let Some(pos) = pending.iter().position(|s| *s == symbol) {
                    pending.swap_remove(pos);
                }
                outcome
            }
            Err(e) => {
                error!(error = %e, "scan task did not complete");
                lost = Some(e.to_string());
                continue;
            }
        };
        match outcome {
            Ok(rated) => report.rated.push(rated),
            Err(failure) => {
                warn!(
                    symbol = %failure.symbol,
                    kind = %failure.kind,
                    error = %failure.message,
                    "symbol skipped"
                );
                report.failures.push(failure);
            }
        }
    }

    // A task that never returned took its symbol with it; attribute it here.
    if let Some(message) = lost {
        for symbol in pending {
            report.failures.push(task_failure(&symbol, &message));
        }
    }

    info!(
        rated = report.rated.len(),
        failed = report.failures.len(),
        "scan complete"
    );
    report
}
