use itertools::Itertools;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::{
    aggregate,
    error::{validate_buffer_radius, validate_max_transfer_minutes, TransferError},
    model::{
        CandidatePair, ScheduleCoverage, StopPoint, StopSide, TimetableEvent, TransferIndex,
        TransferIndexEntry, TransferOpportunity,
    },
    pairing::{pair_transfers, EventIndex},
    proximity::match_candidate_pairs,
};

/// one validated, immutable schedule snapshot: the rail and bus stop sets plus the
/// window-filtered events grouped by stop. an analysis run (or every point of a sweep)
/// evaluates against it without mutating it.
#[derive(Clone, Debug)]
pub struct TransferInputs {
    rail_stops: Vec<StopPoint>,
    bus_stops: Vec<StopPoint>,
    events: EventIndex,
}

impl TransferInputs {
    /// validates the stop sets and indexes the events.
    ///
    /// # Errors
    ///
    /// * a stop_id repeated within the rail or within the bus stop set
    /// * a departure in `rail_arrivals` or an arrival in `bus_departures`
    pub fn new(
        rail_stops: Vec<StopPoint>,
        bus_stops: Vec<StopPoint>,
        rail_arrivals: &[TimetableEvent],
        bus_departures: &[TimetableEvent],
    ) -> Result<TransferInputs, TransferError> {
        check_unique(&rail_stops, StopSide::Rail)?;
        check_unique(&bus_stops, StopSide::Bus)?;
        let events = EventIndex::new(rail_arrivals, bus_departures)?;
        log::debug!(
            "transfer inputs: {} rail stops, {} bus stops, {} rail arrivals, {} bus departures",
            rail_stops.len(),
            bus_stops.len(),
            events.arrival_count(),
            events.departure_count()
        );
        Ok(TransferInputs {
            rail_stops,
            bus_stops,
            events,
        })
    }

    pub fn rail_stops(&self) -> &[StopPoint] {
        &self.rail_stops
    }

    pub fn bus_stops(&self) -> &[StopPoint] {
        &self.bus_stops
    }

    pub fn coverage(&self) -> ScheduleCoverage {
        ScheduleCoverage::from_event_counts(
            self.events.arrival_count(),
            self.events.departure_count(),
        )
    }

    /// runs proximity matching, temporal pairing and aggregation for one
    /// (radius, wait threshold) parameter point.
    pub fn evaluate(
        &self,
        buffer_radius: f64,
        max_transfer_minutes: f64,
    ) -> Result<TransferIndex, TransferError> {
        validate_buffer_radius(buffer_radius)?;
        validate_max_transfer_minutes(max_transfer_minutes)?;

        let proximity = match_candidate_pairs(&self.rail_stops, &self.bus_stops, buffer_radius)?;
        let pairs_by_rail: HashMap<&str, Vec<&CandidatePair>> = proximity
            .pairs
            .iter()
            .into_group_map_by(|p| p.rail_stop_id.as_str());

        // rail stops are independent of one another
        let opportunities: Vec<TransferOpportunity> = self
            .rail_stops
            .par_iter()
            .flat_map_iter(|stop| {
                let pairs = pairs_by_rail
                    .get(stop.stop_id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                self.stop_opportunities(stop, pairs, max_transfer_minutes)
            })
            .collect();

        let routes_by_stop = aggregate::distinct_routes_by_stop(&self.rail_stops, &opportunities);
        let entries = self
            .rail_stops
            .iter()
            .map(|stop| {
                let route_ids = routes_by_stop
                    .get(&stop.stop_id)
                    .map(|routes| routes.iter().cloned().collect_vec())
                    .unwrap_or_default();
                let entry = TransferIndexEntry {
                    stop_id: stop.stop_id.clone(),
                    name: stop.name.clone(),
                    coordinate: stop.coordinate,
                    distinct_route_count: route_ids.len(),
                    route_ids,
                };
                (stop.stop_id.clone(), entry)
            })
            .collect();

        let index = TransferIndex {
            entries,
            coverage: self.coverage(),
            excluded_stops: proximity.excluded,
            candidate_pair_count: proximity.pairs.len(),
            opportunity_count: opportunities.len(),
        };
        log::debug!(
            "radius {buffer_radius}, max wait {max_transfer_minutes} min: {} opportunities, {} of {} rail stops with transfers",
            index.opportunity_count,
            index.stops_with_transfers(),
            index.len()
        );
        Ok(index)
    }

    fn stop_opportunities(
        &self,
        stop: &StopPoint,
        pairs: &[&CandidatePair],
        max_transfer_minutes: f64,
    ) -> Vec<TransferOpportunity> {
        let arrivals = self.events.arrivals_at(&stop.stop_id);
        if arrivals.is_empty() {
            return vec![];
        }
        pairs
            .iter()
            .flat_map(|pair| {
                let departures = self.events.departures_at(&pair.bus_stop_id);
                pair_transfers(pair, arrivals, departures, max_transfer_minutes)
            })
            .collect_vec()
    }
}

fn check_unique(stops: &[StopPoint], side: StopSide) -> Result<(), TransferError> {
    let mut seen = HashSet::new();
    for stop in stops.iter() {
        if !seen.insert(stop.stop_id.as_str()) {
            return Err(TransferError::DuplicateStop {
                stop_id: stop.stop_id.clone(),
                side,
            });
        }
    }
    Ok(())
}
