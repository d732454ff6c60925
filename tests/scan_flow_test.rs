// End-to-End Flow Tests for the Confluence Scanner
//
// These tests exercise the full pipeline without network access:
//   JSON bar files → JsonDirSource → Evaluator → run_scan → ScanReport
//
// Run with: cargo test --test scan_flow_test

use std::path::{Path, PathBuf};
use std::sync::Arc;

use confluence_scanner::{
    run_scan, Bar, BarSeries, Evaluator, IndicatorConfig, JsonDirSource, Label, ScannerConfig,
};

// ============================================================================
// Helpers
// ============================================================================

const DAY_MS: i64 = 86_400_000;

fn ramp_bars(n: usize, start: f64, step: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let p = start + step * i as f64;
            Bar {
                timestamp: 1_600_000_000_000 + i as i64 * DAY_MS,
                open: p,
                high: p,
                low: p,
                close: p,
                volume: 100.0,
            }
        })
        .collect()
}

fn write_bars(dir: &Path, symbol: &str, interval: &str, bars: &[Bar]) {
    let json = serde_json::to_string(bars).unwrap();
    std::fs::write(dir.join(format!("{symbol}_{interval}.json")), json).unwrap();
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("confluence-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn rising_ramp_of_300_bars_is_bullish_confluence() {
    let series = BarSeries::new(ramp_bars(300, 10.0, 0.5)).unwrap();
    let evaluator = Evaluator::new(IndicatorConfig::default()).unwrap();

    let result = evaluator.evaluate(&series).unwrap();
    assert!(result.bull_count >= 5, "bull = {}", result.bull_count);
    assert_eq!(result.bear_count, 0);
    assert_eq!(result.rating().label, Label::Buy);
}

#[test]
fn boundary_of_minimum_lookback() {
    let evaluator = Evaluator::new(IndicatorConfig::default()).unwrap();
    let min_rows = evaluator.min_rows();

    let short = BarSeries::new(ramp_bars(min_rows - 1, 10.0, 1.0)).unwrap();
    let err = evaluator.evaluate(&short).unwrap_err();
    assert_eq!(err.tag(), "InsufficientData");

    let exact = BarSeries::new(ramp_bars(min_rows, 10.0, 1.0)).unwrap();
    assert!(evaluator.evaluate(&exact).is_ok());
}

#[tokio::test]
async fn scan_from_json_files() {
    let dir = scratch_dir("flow");
    write_bars(&dir, "UPUSDT", "1d", &ramp_bars(300, 100.0, 1.0));
    write_bars(&dir, "DOWNUSDT", "1d", &ramp_bars(300, 1000.0, -2.0));
    write_bars(&dir, "NEWUSDT", "1d", &ramp_bars(30, 1.0, 0.1));
    std::fs::write(dir.join("BADUSDT_1d.json"), "not json").unwrap();

    let config = ScannerConfig {
        symbols: vec![
            "UPUSDT".into(),
            "DOWNUSDT".into(),
            "NEWUSDT".into(),
            "BADUSDT".into(),
            "GONEUSDT".into(),
        ],
        data_dir: dir.clone(),
        ..ScannerConfig::default()
    };
    config.validate().unwrap();

    let evaluator = Evaluator::new(config.indicators).unwrap();
    let source = Arc::new(JsonDirSource::new(&config.data_dir));
    let report = run_scan(source, &config.symbols, &config.interval, evaluator).await;

    assert_eq!(report.rated.len(), 2);
    assert_eq!(report.failures.len(), 3);

    let ranked = report.ranked(config.min_rating);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].symbol, "UPUSDT");
    assert_eq!(ranked[0].rating.label, Label::Buy);
    assert_eq!(ranked[1].symbol, "DOWNUSDT");
    assert_eq!(ranked[1].rating.label, Label::Sell);

    let failures = report.sorted_failures();
    assert_eq!(failures[0].symbol, "BADUSDT");
    assert_eq!(failures[0].kind, "Data");
    assert_eq!(failures[1].symbol, "GONEUSDT");
    assert_eq!(failures[2].symbol, "NEWUSDT");
    assert_eq!(failures[2].kind, "InsufficientData");
    assert!((failures[2].last_close - 3.9).abs() < 1e-9);

    let text = report.render(config.min_rating);
    assert!(text.contains("UPUSDT"));
    assert!(text.contains("Errors (3)"));

    std::fs::remove_dir_all(&dir).ok();
}
