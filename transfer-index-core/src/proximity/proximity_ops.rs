use geo::Point;
use itertools::Itertools;
use rstar::{PointDistance, RTree};

use super::BusStopNode;
use crate::{
    error::{validate_buffer_radius, TransferError},
    model::{CandidatePair, ExcludedStop, StopPoint, StopSide},
};

/// output of the proximity stage.
#[derive(Clone, Debug, Default)]
pub struct ProximityMatch {
    /// (rail, bus) pairs inside the buffer, sorted
    pub pairs: Vec<CandidatePair>,
    /// stops from either side that could not be placed on the plane
    pub excluded: Vec<ExcludedStop>,
}

/// finds every bus stop lying strictly inside the disc of radius `buffer_radius` around
/// each rail stop.
///
/// a bus stop exactly `buffer_radius` away does not match. a bus stop sharing the rail
/// stop's coordinate matches at every radius, including 0. stops without a usable
/// coordinate are reported in [`ProximityMatch::excluded`] instead of failing the run.
///
/// # Arguments
///
/// * `rail_stops`    - rail stops in planar coordinates
/// * `bus_stops`     - bus stops in the same planar projection
/// * `buffer_radius` - walking radius in the projection's units, must be finite and >= 0
pub fn match_candidate_pairs(
    rail_stops: &[StopPoint],
    bus_stops: &[StopPoint],
    buffer_radius: f64,
) -> Result<ProximityMatch, TransferError> {
    validate_buffer_radius(buffer_radius)?;

    let mut excluded = vec![];
    let rail_located = locate(rail_stops, StopSide::Rail, &mut excluded);
    let bus_located = locate(bus_stops, StopSide::Bus, &mut excluded);

    let tree = RTree::bulk_load(
        bus_located
            .iter()
            .enumerate()
            .map(|(index, (_, p))| BusStopNode::new(index, p.x(), p.y()))
            .collect_vec(),
    );

    let radius_2 = buffer_radius * buffer_radius;
    let pairs = rail_located
        .iter()
        .flat_map(|(rail, p)| {
            let query = [p.x(), p.y()];
            tree.locate_within_distance(query, radius_2)
                .filter(|node| within_buffer(node.distance_2(&query), radius_2))
                .map(|node| {
                    let (bus, _) = bus_located[node.index];
                    CandidatePair::new(&rail.stop_id, &bus.stop_id)
                })
                .collect_vec()
        })
        .sorted()
        .collect_vec();

    excluded.sort();
    if !excluded.is_empty() {
        log::warn!(
            "{} stops excluded from proximity matching due to missing or invalid coordinates",
            excluded.len()
        );
        for stop in excluded.iter() {
            log::debug!("excluded {stop}");
        }
    }
    log::debug!(
        "found {} candidate pairs within radius {buffer_radius} between {} rail and {} bus stops",
        pairs.len(),
        rail_located.len(),
        bus_located.len()
    );

    Ok(ProximityMatch { pairs, excluded })
}

/// strict-interior containment test on squared distances. coincident points are
/// treated as inside even when the radius is 0.
pub fn within_buffer(distance_2: f64, radius_2: f64) -> bool {
    distance_2 < radius_2 || distance_2 == 0.0
}

fn locate<'a>(
    stops: &'a [StopPoint],
    side: StopSide,
    excluded: &mut Vec<ExcludedStop>,
) -> Vec<(&'a StopPoint, Point<f64>)> {
    stops
        .iter()
        .filter_map(|stop| match stop.planar_coordinate() {
            Ok(p) => Some((stop, p)),
            Err(reason) => {
                excluded.push(ExcludedStop {
                    stop_id: stop.stop_id.clone(),
                    side,
                    reason,
                });
                None
            }
        })
        .collect_vec()
}
