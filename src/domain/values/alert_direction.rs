use serde::{Deserialize, Serialize};

/// Which side of the threshold a rule watches. Derived from the threshold sign:
/// zero and positive thresholds are upward, negative thresholds downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Upward,
    Downward,
}

impl AlertDirection {
    pub fn for_threshold(threshold_pct: f64) -> Self {
        if threshold_pct >= 0.0 {
            AlertDirection::Upward
        } else {
            AlertDirection::Downward
        }
    }

    /// Whether `observed_pct` is at or beyond `threshold_pct` in this direction.
    pub fn is_crossed(&self, observed_pct: f64, threshold_pct: f64) -> bool {
        match self {
            AlertDirection::Upward => observed_pct >= threshold_pct,
            AlertDirection::Downward => observed_pct <= threshold_pct,
        }
    }
}
