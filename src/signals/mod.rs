// =============================================================================
// Signals Module
// =============================================================================
//
// From indicator output to a labelled confluence score:
// - Per-indicator classification into bullish / bearish / neutral
// - Confluence counting with ADX momentum credit
// - Star rating and BUY / SELL / NEUTRAL label

pub mod aggregator;
pub mod classifier;
pub mod rating;

pub use aggregator::{aggregate, ConfluenceCounts, IndicatorSignals, Verdict};
pub use rating::{classify, Rating};
