use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::StopSide;

/// a stop that was left out of proximity matching.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExcludedStop {
    pub stop_id: String,
    pub side: StopSide,
    pub reason: ExclusionReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    MissingCoordinate,
    NonFiniteCoordinate,
}

impl Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::MissingCoordinate => write!(f, "missing coordinate"),
            ExclusionReason::NonFiniteCoordinate => write!(f, "non-finite coordinate"),
        }
    }
}

impl Display for ExcludedStop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stop '{}' ({})", self.side, self.stop_id, self.reason)
    }
}
