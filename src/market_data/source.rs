// =============================================================================
// Bar sources
// =============================================================================
//
// The scanner does not know where bars come from.  A `BarSource` hands back a
// validated `BarSeries` for a (symbol, interval) pair; the JSON directory
// source below reads snapshots written by an external downloader.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::DateTime;
use tracing::debug;

use super::bar_series::{Bar, BarSeries};

/// Supplier of historical bars.  Implementations must be shareable across
/// the scanner's worker tasks.
pub trait BarSource: Send + Sync {
    fn fetch(&self, symbol: &str, interval: &str) -> Result<BarSeries>;
}

// ---------------------------------------------------------------------------
// JsonDirSource
// ---------------------------------------------------------------------------

/// Reads `<dir>/<SYMBOL>_<interval>.json`.
///
/// Expected shape: an array of bar objects, oldest first.
/// ```json
/// [ { "timestamp": 1700000000000, "open": "1.0", "high": 1.2, "low": 0.9, "close": 1.1 } ]
/// ```
/// Prices may be JSON numbers or numeric strings.  `timestamp` is epoch
/// milliseconds or an RFC 3339 string.  `volume` is optional.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str, interval: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", symbol.to_uppercase(), interval))
    }
}

impl BarSource for JsonDirSource {
    fn fetch(&self, symbol: &str, interval: &str) -> Result<BarSeries> {
        let path = self.path_for(symbol, interval);
        let series = load_json_bars(&path)?;
        debug!(symbol, interval, bars = series.len(), path = %path.display(), "bars loaded");
        Ok(series)
    }
}

/// Parse a JSON bar file into a validated series.
pub fn load_json_bars(path: &Path) -> Result<BarSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bars from {}", path.display()))?;
    parse_json_bars(&content).with_context(|| format!("invalid bar file {}", path.display()))
}

/// Parse a JSON array of bar objects.
pub fn parse_json_bars(text: &str) -> Result<BarSeries> {
    let root: serde_json::Value = serde_json::from_str(text).context("failed to parse bar JSON")?;
    let rows = root.as_array().context("bar JSON must be an array")?;

    let mut bars = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let bar = Bar {
            timestamp: parse_timestamp(&row["timestamp"])
                .with_context(|| format!("row {i}: bad timestamp"))?,
            open: parse_f64(&row["open"], "open").with_context(|| format!("row {i}"))?,
            high: parse_f64(&row["high"], "high").with_context(|| format!("row {i}"))?,
            low: parse_f64(&row["low"], "low").with_context(|| format!("row {i}"))?,
            close: parse_f64(&row["close"], "close").with_context(|| format!("row {i}"))?,
            volume: match &row["volume"] {
                serde_json::Value::Null => 0.0,
                v => parse_f64(v, "volume").with_context(|| format!("row {i}"))?,
            },
        };
        bars.push(bar);
    }

    Ok(BarSeries::new(bars)?)
}

/// Numeric fields arrive either as JSON numbers or as numeric strings.
fn parse_f64(val: &serde_json::Value, name: &str) -> Result<f64> {
    match val {
        serde_json::Value::String(s) => s
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}")),
        serde_json::Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64")),
        serde_json::Value::Null => anyhow::bail!("missing field {name}"),
        _ => anyhow::bail!("field {name} has unexpected JSON type"),
    }
}

fn parse_timestamp(val: &serde_json::Value) -> Result<i64> {
    match val {
        serde_json::Value::Number(n) => n.as_i64().context("timestamp is not an integer"),
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp_millis())
            .with_context(|| format!("failed to parse timestamp {s}")),
        _ => anyhow::bail!("missing field timestamp"),
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// In-memory source keyed by symbol.  Ignores the interval.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, BarSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, series: BarSeries) {
        self.series.insert(symbol.into(), series);
    }
}

impl BarSource for MemorySource {
    fn fetch(&self, symbol: &str, _interval: &str) -> Result<BarSeries> {
        self.series
            .get(symbol)
            .cloned()
            .with_context(|| format!("no bars for {symbol}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mixed_number_and_string_fields() {
        let json = r#"[
            { "timestamp": 1700000000000, "open": "1.0", "high": 1.5, "low": "0.5", "close": 1.2, "volume": "10" },
            { "timestamp": 1700000060000, "open": 1.2, "high": 1.6, "low": 1.1, "close": 1.4 }
        ]"#;
        let series = parse_json_bars(json).expect("should parse");
        assert_eq!(series.len(), 2);
        assert!((series.bars()[0].open - 1.0).abs() < f64::EPSILON);
        assert!((series.bars()[0].volume - 10.0).abs() < f64::EPSILON);
        assert_eq!(series.bars()[1].volume, 0.0);
        assert_eq!(series.last_close(), Some(1.4));
    }

    #[test]
    fn parse_rfc3339_timestamps() {
        let json = r#"[
            { "timestamp": "2024-01-01T00:00:00Z", "open": 1, "high": 1, "low": 1, "close": 1 },
            { "timestamp": "2024-01-02T00:00:00Z", "open": 1, "high": 1, "low": 1, "close": 1 }
        ]"#;
        let series = parse_json_bars(json).expect("should parse");
        assert_eq!(series.bars()[1].timestamp - series.bars()[0].timestamp, 86_400_000);
    }

    #[test]
    fn parse_rejects_missing_close() {
        let json = r#"[ { "timestamp": 1, "open": 1, "high": 1, "low": 1 } ]"#;
        assert!(parse_json_bars(json).is_err());
    }

    #[test]
    fn parse_rejects_unordered_rows() {
        let json = r#"[
            { "timestamp": 2, "open": 1, "high": 1, "low": 1, "close": 1 },
            { "timestamp": 1, "open": 1, "high": 1, "low": 1, "close": 1 }
        ]"#;
        assert!(parse_json_bars(json).is_err());
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(parse_json_bars(r#"{ "bars": [] }"#).is_err());
    }

    #[test]
    fn json_dir_source_reads_symbol_file() {
        let dir = std::env::temp_dir().join(format!("confluence-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let source = JsonDirSource::new(&dir);
        let path = source.path_for("btcusdt", "1d");
        assert!(path.ends_with("BTCUSDT_1d.json"));
        std::fs::write(
            &path,
            r#"[ { "timestamp": 0, "open": 1, "high": 2, "low": 0.5, "close": 1.5 } ]"#,
        )
        .unwrap();

        let series = source.fetch("BTCUSDT", "1d").unwrap();
        assert_eq!(series.last_close(), Some(1.5));
        assert!(source.fetch("ETHUSDT", "1d").is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn memory_source_unknown_symbol_errors() {
        let mut source = MemorySource::new();
        source.insert("AAA", BarSeries::default());
        assert!(source.fetch("AAA", "1d").unwrap().is_empty());
        assert!(source.fetch("BBB", "1d").is_err());
    }
}
