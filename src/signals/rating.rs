// =============================================================================
// Rating Classifier
// =============================================================================
//
// Decision rule:
//   BUY     when bull >= 5 and bull >= bear   (stars = bull)
//   SELL    when bear >= 5                    (stars = bear)
//   NEUTRAL otherwise                         (stars = 0)
//
// Bull wins ties.

use serde::{Deserialize, Serialize};

use super::aggregator::ConfluenceCounts;
use crate::types::Label;

/// Minimum confluence count for a BUY or SELL label.
pub const CONVICTION_THRESHOLD: u8 = 5;

/// Star rating and label for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub label: Label,
    pub stars: u8,
}

impl Rating {
    pub fn neutral() -> Self {
        Self {
            label: Label::Neutral,
            stars: 0,
        }
    }

    /// `"★★★★★"` style rendering.
    pub fn stars_text(&self) -> String {
        "★".repeat(self.stars as usize)
    }
}

/// Threshold the confluence counts into a rating.
pub fn classify(counts: ConfluenceCounts) -> Rating {
    let ConfluenceCounts { bull, bear } = counts;
    if bull >= CONVICTION_THRESHOLD && bull >= bear {
        Rating {
            label: Label::Buy,
            stars: bull,
        }
    } else if bear >= CONVICTION_THRESHOLD {
        Rating {
            label: Label::Sell,
            stars: bear,
        }
    } else {
        Rating::neutral()
    }
}
