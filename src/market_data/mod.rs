pub mod bar_series;
pub mod source;

// Re-export for convenient access (e.g. `use crate::market_data::BarSeries`).
pub use bar_series::{Bar, BarSeries};
pub use source::{BarSource, JsonDirSource, MemorySource};
