// =============================================================================
// Confluence Scanner
// =============================================================================
//
// Six technical indicators (HMA, Heiken-Ashi, smoothed Heiken-Ashi, RSI, ADX,
// Ichimoku) are computed from OHLC bars, classified, and folded into bull and
// bear confluence counts that flag high-conviction setups.  Classification
// only: nothing here places orders.
// =============================================================================

pub mod config;
pub mod error;
pub mod evaluator;
pub mod indicators;
pub mod market_data;
pub mod report;
pub mod scanner;
pub mod signals;
pub mod types;

pub use config::{IndicatorConfig, ScannerConfig};
pub use error::{ConfigError, EvaluationError, IndicatorError, SeriesError};
pub use evaluator::{ConfluenceResult, EvaluationOutcome, Evaluator, IndicatorSnapshot};
pub use market_data::{Bar, BarSeries, BarSource, JsonDirSource, MemorySource};
pub use report::{RatedSymbol, ScanFailure, ScanReport};
pub use scanner::{run_scan, scan_symbol};
pub use types::{IndicatorKind, Label, Signal};
