use crate::model::{CandidatePair, ServiceTime, TransferOpportunity};

use super::Departure;

/// emits one [`TransferOpportunity`] for every (arrival, departure) combination at a
/// candidate pair whose wait falls inside `[0, max_transfer_minutes]`.
///
/// waits are computed on elapsed service seconds, never modulo 24 hours. records are
/// not deduplicated here.
///
/// # Arguments
///
/// * `pair`                 - the rail stop / bus stop pair being evaluated
/// * `arrivals`             - rail arrival times at the pair's rail stop, sorted ascending
/// * `departures`           - bus departures at the pair's bus stop, sorted by time
/// * `max_transfer_minutes` - inclusive upper bound on the wait, assumed validated
pub fn pair_transfers(
    pair: &CandidatePair,
    arrivals: &[ServiceTime],
    departures: &[Departure],
    max_transfer_minutes: f64,
) -> Vec<TransferOpportunity> {
    let mut result = vec![];
    for arrival in arrivals.iter() {
        // departures before the arrival can never qualify
        let first = departures.partition_point(|d| d.time < *arrival);
        for departure in departures[first..].iter() {
            let wait = arrival.seconds_until(&departure.time);
            if !within_transfer_window(wait, max_transfer_minutes) {
                break;
            }
            result.push(TransferOpportunity::new(
                &pair.rail_stop_id,
                &departure.route_id,
            ));
        }
    }
    result
}

/// the wait-time rule: `0 <= wait_seconds / 60 <= max_transfer_minutes`.
pub fn within_transfer_window(wait_seconds: i64, max_transfer_minutes: f64) -> bool {
    let wait_minutes = wait_seconds as f64 / 60.0;
    0.0 <= wait_minutes && wait_minutes <= max_transfer_minutes
}
