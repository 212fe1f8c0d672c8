use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// which side of a transfer a stop or event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopSide {
    Rail,
    Bus,
}

impl Display for StopSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopSide::Rail => write!(f, "rail"),
            StopSide::Bus => write!(f, "bus"),
        }
    }
}
