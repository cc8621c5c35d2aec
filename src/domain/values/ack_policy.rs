use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What acknowledging a triggered alert does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckPolicy {
    /// Dismiss from the current display set only; the next recompute brings it back
    /// if the condition still holds.
    #[default]
    Cosmetic,
    /// Suppress the rule until its condition stops holding, then re-arm it.
    Latch,
}

impl fmt::Display for AckPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cosmetic => write!(f, "cosmetic"),
            Self::Latch => write!(f, "latch"),
        }
    }
}

impl FromStr for AckPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosmetic" => Ok(Self::Cosmetic),
            "latch" => Ok(Self::Latch),
            _ => Err(format!(
                "Invalid ack policy: '{}'. Use 'cosmetic' or 'latch'",
                s
            )),
        }
    }
}
