use itertools::Itertools;
use std::collections::HashMap;

use crate::{
    error::TransferError,
    model::{EventKind, ServiceTime, StopSide, TimetableEvent},
};

/// a bus departure at some stop.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Departure {
    pub time: ServiceTime,
    pub route_id: String,
}

/// rail arrivals and bus departures grouped by stop id, each group sorted by time.
/// built once per schedule snapshot and shared read-only between evaluations.
#[derive(Clone, Debug, Default)]
pub struct EventIndex {
    arrivals: HashMap<String, Vec<ServiceTime>>,
    departures: HashMap<String, Vec<Departure>>,
    arrival_count: usize,
    departure_count: usize,
}

impl EventIndex {
    /// groups the event lists by stop. fails if an event of the wrong kind was supplied
    /// on either side.
    pub fn new(
        rail_arrivals: &[TimetableEvent],
        bus_departures: &[TimetableEvent],
    ) -> Result<EventIndex, TransferError> {
        check_kind(rail_arrivals, StopSide::Rail, EventKind::Arrival)?;
        check_kind(bus_departures, StopSide::Bus, EventKind::Departure)?;

        let arrivals = rail_arrivals
            .iter()
            .map(|e| (e.stop_id.clone(), e.time))
            .into_group_map()
            .into_iter()
            .map(|(stop_id, times)| (stop_id, times.into_iter().sorted().collect_vec()))
            .collect::<HashMap<_, _>>();

        let departures = bus_departures
            .iter()
            .map(|e| {
                let departure = Departure {
                    time: e.time,
                    route_id: e.route_id.clone(),
                };
                (e.stop_id.clone(), departure)
            })
            .into_group_map()
            .into_iter()
            .map(|(stop_id, deps)| (stop_id, deps.into_iter().sorted().collect_vec()))
            .collect::<HashMap<_, _>>();

        Ok(EventIndex {
            arrivals,
            departures,
            arrival_count: rail_arrivals.len(),
            departure_count: bus_departures.len(),
        })
    }

    /// sorted arrival times at a rail stop, empty if there are none.
    pub fn arrivals_at(&self, stop_id: &str) -> &[ServiceTime] {
        self.arrivals.get(stop_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// departures at a bus stop sorted by time, empty if there are none.
    pub fn departures_at(&self, stop_id: &str) -> &[Departure] {
        self.departures.get(stop_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn arrival_count(&self) -> usize {
        self.arrival_count
    }

    pub fn departure_count(&self) -> usize {
        self.departure_count
    }
}

fn check_kind(
    events: &[TimetableEvent],
    side: StopSide,
    expected: EventKind,
) -> Result<(), TransferError> {
    match events.iter().find(|e| e.kind != expected) {
        None => Ok(()),
        Some(e) => Err(TransferError::EventKindMismatch {
            side,
            expected,
            found: e.kind,
            stop_id: e.stop_id.clone(),
        }),
    }
}
