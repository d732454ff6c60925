// =============================================================================
// Confluence Scanner — Main Entry Point
// =============================================================================
//
// Loads the scanner config, evaluates every configured symbol from the bar
// snapshots in `data_dir`, and prints the ranked signals plus the error log.
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use confluence_scanner::{run_scan, Evaluator, JsonDirSource, ScannerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 2. Config ────────────────────────────────────────────────────────
    let config_path = std::env::var("CONFLUENCE_CONFIG")
        .unwrap_or_else(|_| "scanner_config.json".to_string());

    let mut config =
        ScannerConfig::load_or_default(&config_path).context("invalid scanner configuration")?;

    if let Ok(syms) = std::env::var("CONFLUENCE_SYMBOLS") {
        config.symbols = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(dir) = std::env::var("CONFLUENCE_DATA_DIR") {
        config.data_dir = dir.into();
    }

    config.validate().context("invalid scanner configuration")?;
    let evaluator = Evaluator::new(config.indicators).context("invalid indicator configuration")?;

    info!(
        symbols = config.symbols.len(),
        interval = %config.interval,
        data_dir = %config.data_dir.display(),
        min_rating = config.min_rating,
        "Configuration ready"
    );

    // ── 3. Scan ──────────────────────────────────────────────────────────
    let source = Arc::new(JsonDirSource::new(&config.data_dir));
    let report = run_scan(source, &config.symbols, &config.interval, evaluator).await;

    // ── 4. Report ────────────────────────────────────────────────────────
    println!("{}", report.render(config.min_rating));

    Ok(())
}
