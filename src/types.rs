// =============================================================================
// Shared types used across the confluence scanner
// =============================================================================

use serde::{Deserialize, Serialize};

/// Directional verdict of a single indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Bearish = -1,
    #[default]
    Neutral = 0,
    Bullish = 1,
}

impl Signal {
    /// Map an ordering-style comparison onto a signal: positive is bullish,
    /// negative bearish, zero (or NaN) neutral.
    pub fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            Self::Bullish
        } else if diff < 0.0 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Numeric value in {-1, 0, +1}.
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Bullish => write!(f, "Bullish"),
        }
    }
}

/// Final label assigned by the rating classifier.
///
/// Variant order is the report order: BUY first, then SELL, then NEUTRAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Identifies one of the six indicator calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Hma,
    HeikenAshi,
    SmoothedHeikenAshi,
    Rsi,
    Adx,
    Ichimoku,
}

impl IndicatorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hma => "HMA",
            Self::HeikenAshi => "HA",
            Self::SmoothedHeikenAshi => "SHA",
            Self::Rsi => "RSI",
            Self::Adx => "ADX",
            Self::Ichimoku => "Ichimoku",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_from_diff() {
        assert_eq!(Signal::from_diff(0.5), Signal::Bullish);
        assert_eq!(Signal::from_diff(-0.5), Signal::Bearish);
        assert_eq!(Signal::from_diff(0.0), Signal::Neutral);
        assert_eq!(Signal::from_diff(f64::NAN), Signal::Neutral);
    }

    #[test]
    fn signal_numeric_values() {
        assert_eq!(Signal::Bearish.value(), -1);
        assert_eq!(Signal::Neutral.value(), 0);
        assert_eq!(Signal::Bullish.value(), 1);
    }

    #[test]
    fn label_order_is_report_order() {
        let mut labels = vec![Label::Neutral, Label::Sell, Label::Buy];
        labels.sort();
        assert_eq!(labels, vec![Label::Buy, Label::Sell, Label::Neutral]);
    }
}
