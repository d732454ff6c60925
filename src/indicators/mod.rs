// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the
// confluence score.  Series functions return an empty `Vec` and point
// functions return `None` on insufficient data, so callers are forced to
// handle the undefined case.

pub mod adx;
pub mod ema;
pub mod heiken_ashi;
pub mod hma;
pub mod ichimoku;
pub mod rsi;
pub mod wma;

pub use adx::{calculate_adx, AdxOutput};
pub use heiken_ashi::{calculate_heiken_ashi, calculate_smoothed_heiken_ashi, HeikenAshiSeries};
pub use hma::calculate_hma;
pub use ichimoku::{calculate_ichimoku, IchimokuCloud};
pub use rsi::calculate_rsi;
