// =============================================================================
// Confluence Aggregator
// =============================================================================
//
// Five directional signals (HMA, HA, SHA, RSI, Ichimoku) are counted per side.
// ADX momentum carries no direction of its own: it adds one point to every
// side that already has at least one directional confirmation, and to neither
// side when both are empty.

use serde::{Deserialize, Serialize};

use crate::types::{IndicatorKind, Signal};

/// Upper bound of either count: five directional signals plus momentum.
pub const MAX_CONFLUENCE: u8 = 6;

/// Per-indicator verdicts of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorSignals {
    pub hma: Signal,
    pub heiken_ashi: Signal,
    pub smoothed_heiken_ashi: Signal,
    pub rsi: Signal,
    pub ichimoku: Signal,
    pub adx_momentum: bool,
}

/// Value held by one entry of [`IndicatorSignals::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Direction(Signal),
    Momentum(bool),
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direction(signal) => match signal.value() {
                0 => write!(f, "0"),
                v => write!(f, "{v:+}"),
            },
            Self::Momentum(true) => write!(f, "on"),
            Self::Momentum(false) => write!(f, "off"),
        }
    }
}

impl IndicatorSignals {
    /// The five directional signals.
    pub fn directional(&self) -> [Signal; 5] {
        [
            self.hma,
            self.heiken_ashi,
            self.smoothed_heiken_ashi,
            self.rsi,
            self.ichimoku,
        ]
    }

    /// Every indicator keyed by name, in pipeline order.
    pub fn entries(&self) -> [(IndicatorKind, Verdict); 6] {
        [
            (IndicatorKind::Hma, Verdict::Direction(self.hma)),
            (IndicatorKind::HeikenAshi, Verdict::Direction(self.heiken_ashi)),
            (
                IndicatorKind::SmoothedHeikenAshi,
                Verdict::Direction(self.smoothed_heiken_ashi),
            ),
            (IndicatorKind::Rsi, Verdict::Direction(self.rsi)),
            (IndicatorKind::Adx, Verdict::Momentum(self.adx_momentum)),
            (IndicatorKind::Ichimoku, Verdict::Direction(self.ichimoku)),
        ]
    }
}

/// Bull and bear confluence counts, each in `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfluenceCounts {
    pub bull: u8,
    pub bear: u8,
}

/// Count confirmations per side and credit momentum.
pub fn aggregate(signals: &IndicatorSignals) -> ConfluenceCounts {
    let directional = signals.directional();
    let count = |wanted: Signal| directional.iter().filter(|&&s| s == wanted).count() as u8;

    let primary_bull = count(Signal::Bullish);
    let primary_bear = count(Signal::Bearish);
    let credit = |primary: u8| primary + u8::from(signals.adx_momentum && primary > 0);

    ConfluenceCounts {
        bull: credit(primary_bull).min(MAX_CONFLUENCE),
        bear: credit(primary_bear).min(MAX_CONFLUENCE),
    }
}
