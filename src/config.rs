// =============================================================================
// Configuration — indicator lengths and scanner settings
// =============================================================================
//
// `IndicatorConfig` holds the tunable lengths of the confluence pipeline.
// `ScannerConfig` wraps it with the run settings (symbols, interval, data
// directory, report threshold) and is persisted as JSON.
//
// All fields carry `#[serde(default)]` so that a partial config file loads
// with the remaining values defaulted.  Persistence uses an atomic tmp +
// rename.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Kijun-sen window.  Fixed, never user-configurable.
pub const KIJUN_LENGTH: usize = 26;

/// Senkou Span B window.  Fixed, never user-configurable.
pub const SENKOU_B_LENGTH: usize = 52;

/// Warm-up bars required on top of the longest indicator window.
pub const WARMUP_BARS: usize = 50;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_hma_length() -> usize {
    20
}

fn default_adx_threshold() -> usize {
    1
}

fn default_rsi_length() -> usize {
    10
}

fn default_adx_length() -> usize {
    14
}

fn default_tenkan_length() -> usize {
    9
}

fn default_smoothed_ha_length() -> usize {
    10
}

fn default_symbols() -> Vec<String> {
    vec![
        "BTCUSDT".to_string(),
        "ETHUSDT".to_string(),
        "BNBUSDT".to_string(),
        "XRPUSDT".to_string(),
        "SOLUSDT".to_string(),
    ]
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_min_rating() -> u8 {
    5
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Tunable lengths of the confluence pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Hull moving average window.
    #[serde(default = "default_hma_length")]
    pub hma_length: usize,

    /// ADX level at or above which the market counts as having momentum.
    #[serde(default = "default_adx_threshold")]
    pub adx_threshold: usize,

    /// RSI period (on OHLC4).
    #[serde(default = "default_rsi_length")]
    pub rsi_length: usize,

    /// ADX period.
    #[serde(default = "default_adx_length")]
    pub adx_length: usize,

    /// Ichimoku Tenkan-sen window.
    #[serde(default = "default_tenkan_length")]
    pub ichimoku_tenkan_length: usize,

    /// EMA span applied to raw OHLC before the Heiken-Ashi recurrence.
    #[serde(default = "default_smoothed_ha_length")]
    pub smoothed_ha_len1: usize,

    /// EMA span applied to the smoothed Heiken-Ashi open/close.
    #[serde(default = "default_smoothed_ha_length")]
    pub smoothed_ha_len2: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            hma_length: default_hma_length(),
            adx_threshold: default_adx_threshold(),
            rsi_length: default_rsi_length(),
            adx_length: default_adx_length(),
            ichimoku_tenkan_length: default_tenkan_length(),
            smoothed_ha_len1: default_smoothed_ha_length(),
            smoothed_ha_len2: default_smoothed_ha_length(),
        }
    }
}

impl IndicatorConfig {
    /// Reject any length below 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("hma_length", self.hma_length),
            ("adx_threshold", self.adx_threshold),
            ("rsi_length", self.rsi_length),
            ("adx_length", self.adx_length),
            ("ichimoku_tenkan_length", self.ichimoku_tenkan_length),
            ("smoothed_ha_len1", self.smoothed_ha_len1),
            ("smoothed_ha_len2", self.smoothed_ha_len2),
        ];
        match lengths.iter().find(|(_, value)| *value < 1) {
            Some(&(name, value)) => Err(ConfigError::InvalidLength { name, value }),
            None => Ok(()),
        }
    }

    /// Bars required before any calculator runs: the longest window plus
    /// warm-up.  The ADX threshold is a level, not a window, and is excluded.
    pub fn min_rows(&self) -> usize {
        [
            self.hma_length,
            self.adx_length,
            self.rsi_length,
            self.ichimoku_tenkan_length,
            KIJUN_LENGTH,
            SENKOU_B_LENGTH,
            self.smoothed_ha_len1,
            self.smoothed_ha_len2,
        ]
        .into_iter()
        .max()
        .unwrap_or(SENKOU_B_LENGTH)
            + WARMUP_BARS
    }
}

// =============================================================================
// ScannerConfig
// =============================================================================

/// Settings for one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Symbols to evaluate.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Bar interval requested from the source (e.g. "1h", "1d").
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Directory read by the JSON bar source.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Minimum star rating shown in the report (5 or 6).
    #[serde(default = "default_min_rating")]
    pub min_rating: u8,

    /// Indicator lengths.
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            interval: default_interval(),
            data_dir: default_data_dir(),
            min_rating: default_min_rating(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl ScannerConfig {
    /// Validate everything that must hold before a scan starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        if !(5..=6).contains(&self.min_rating) {
            return Err(ConfigError::InvalidMinRating(self.min_rating));
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        Ok(())
    }

    /// Load configuration from `path`, falling back to defaults only when the
    /// file does not exist.  Unreadable or malformed files are errors.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "scanner config not found, using defaults");
                Ok(Self::default())
            }
            _ => Self::load(path),
        }
    }

    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scanner config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse scanner config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = config.symbols.len(),
            interval = %config.interval,
            "scanner config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` (write `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise scanner config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "scanner config saved");
        Ok(())
    }
}
