use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// describes whether the supplied schedule had any service at all, so callers can tell
/// "no service that day" apart from "service exists but no nearby routes". both cases
/// produce an index full of zero counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleCoverage {
    /// no rail arrivals and no bus departures were supplied
    NoService,
    /// bus departures exist but no rail arrivals
    NoRailArrivals,
    /// rail arrivals exist but no bus departures
    NoBusDepartures,
    /// both sides have events
    Served,
}

impl ScheduleCoverage {
    pub fn from_event_counts(rail_arrivals: usize, bus_departures: usize) -> ScheduleCoverage {
        match (rail_arrivals, bus_departures) {
            (0, 0) => ScheduleCoverage::NoService,
            (0, _) => ScheduleCoverage::NoRailArrivals,
            (_, 0) => ScheduleCoverage::NoBusDepartures,
            _ => ScheduleCoverage::Served,
        }
    }

    /// true when at least one side of the schedule is empty, which forces every count to 0.
    pub fn is_empty_schedule(&self) -> bool {
        !matches!(self, ScheduleCoverage::Served)
    }
}

impl Display for ScheduleCoverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScheduleCoverage::NoService => "no_service",
            ScheduleCoverage::NoRailArrivals => "no_rail_arrivals",
            ScheduleCoverage::NoBusDepartures => "no_bus_departures",
            ScheduleCoverage::Served => "served",
        };
        write!(f, "{s}")
    }
}
