use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::ServiceTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Arrival => write!(f, "arrival"),
            EventKind::Departure => write!(f, "departure"),
        }
    }
}

/// a scheduled vehicle arrival or departure at a stop, already restricted to the
/// analysis window by the schedule loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableEvent {
    pub stop_id: String,
    pub route_id: String,
    pub time: ServiceTime,
    pub kind: EventKind,
}

impl TimetableEvent {
    pub fn arrival(stop_id: &str, route_id: &str, time: ServiceTime) -> TimetableEvent {
        TimetableEvent {
            stop_id: stop_id.to_string(),
            route_id: route_id.to_string(),
            time,
            kind: EventKind::Arrival,
        }
    }

    pub fn departure(stop_id: &str, route_id: &str, time: ServiceTime) -> TimetableEvent {
        TimetableEvent {
            stop_id: stop_id.to_string(),
            route_id: route_id.to_string(),
            time,
            kind: EventKind::Departure,
        }
    }
}
