use crate::{
    error::TransferError,
    model::{StopPoint, TimetableEvent, TransferIndex},
};

use super::TransferInputs;

/// computes the distinct bus route count for every rail stop.
///
/// # Arguments
///
/// * `rail_stops`           - every rail stop to report on, in planar coordinates
/// * `bus_stops`            - candidate feeder bus stops in the same projection
/// * `rail_arrivals`        - window-filtered rail arrival events
/// * `bus_departures`       - window-filtered bus departure events
/// * `buffer_radius`        - walking radius, finite and >= 0
/// * `max_transfer_minutes` - inclusive wait limit after arrival, finite and >= 0
///
/// # Returns
///
/// a [`TransferIndex`] holding exactly one entry per rail stop, along with a
/// [`crate::model::ScheduleCoverage`] signal describing whether any service was present.
pub fn compute_transfer_index(
    rail_stops: &[StopPoint],
    bus_stops: &[StopPoint],
    rail_arrivals: &[TimetableEvent],
    bus_departures: &[TimetableEvent],
    buffer_radius: f64,
    max_transfer_minutes: f64,
) -> Result<TransferIndex, TransferError> {
    let inputs = TransferInputs::new(
        rail_stops.to_vec(),
        bus_stops.to_vec(),
        rail_arrivals,
        bus_departures,
    )?;
    inputs.evaluate(buffer_radius, max_transfer_minutes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{EventKind, ScheduleCoverage, ServiceTime, StopSide};
    use itertools::Itertools;

    fn t(s: &str) -> ServiceTime {
        ServiceTime::parse(s).expect("test invariant failed: bad time literal")
    }

    /// R1 at the origin with one arrival at 07:00; B1 50m east served by route X at
    /// 07:03 and 07:10.
    fn single_station() -> (Vec<StopPoint>, Vec<StopPoint>, Vec<TimetableEvent>, Vec<TimetableEvent>) {
        let rail = vec![StopPoint::located("R1", "Central Station", 0.0, 0.0)];
        let bus = vec![StopPoint::located("B1", "Central at Main", 50.0, 0.0)];
        let arrivals = vec![TimetableEvent::arrival("R1", "301", ServiceTime::from_seconds(25200))];
        let departures = vec![
            TimetableEvent::departure("B1", "X", ServiceTime::from_seconds(25380)),
            TimetableEvent::departure("B1", "X", ServiceTime::from_seconds(25800)),
        ];
        (rail, bus, arrivals, departures)
    }

    /// three rail stations along a line with a handful of bus stops and routes around them
    fn corridor() -> (Vec<StopPoint>, Vec<StopPoint>, Vec<TimetableEvent>, Vec<TimetableEvent>) {
        let rail = vec![
            StopPoint::located("R1", "North", 0.0, 0.0),
            StopPoint::located("R2", "Middle", 0.0, 800.0),
            StopPoint::located("R3", "South", 0.0, 1600.0),
        ];
        let bus = vec![
            StopPoint::located("B1", "a", 30.0, 0.0),
            StopPoint::located("B2", "b", -90.0, 40.0),
            StopPoint::located("B3", "c", 150.0, 800.0),
            StopPoint::located("B4", "d", 0.0, 1000.0),
            StopPoint::located("B5", "e", 300.0, 1600.0),
            StopPoint::located("B6", "f", 0.0, 400.0),
        ];
        let arrivals = ["R1", "R2", "R3"]
            .into_iter()
            .flat_map(|r| {
                ["07:00:00", "07:10:00", "07:20:00"]
                    .into_iter()
                    .map(move |time| TimetableEvent::arrival(r, "301", t(time)))
            })
            .collect_vec();
        let departures = vec![
            TimetableEvent::departure("B1", "7", t("07:02:00")),
            TimetableEvent::departure("B1", "8", t("07:14:00")),
            TimetableEvent::departure("B2", "7", t("07:05:00")),
            TimetableEvent::departure("B2", "9", t("07:29:00")),
            TimetableEvent::departure("B3", "12", t("07:11:00")),
            TimetableEvent::departure("B3", "13", t("07:40:00")),
            TimetableEvent::departure("B4", "12", t("07:21:30")),
            TimetableEvent::departure("B4", "20", t("07:03:00")),
            TimetableEvent::departure("B5", "21", t("07:20:00")),
            TimetableEvent::departure("B6", "22", t("07:01:00")),
        ];
        (rail, bus, arrivals, departures)
    }

    #[test]
    fn test_scenario_radius() {
        let (rail, bus, arr, dep) = single_station();
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 6.0).expect("ok");
        assert_eq!(index.route_count("R1"), Some(1));
        assert_eq!(index.candidate_pair_count, 1);
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 40.0, 6.0).expect("ok");
        assert_eq!(index.route_count("R1"), Some(0));
        assert_eq!(index.candidate_pair_count, 0);
    }

    #[test]
    fn test_scenario_wait_threshold() {
        let (rail, bus, arr, dep) = single_station();
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 6.0).expect("ok");
        // only the 07:03 departure qualifies
        assert_eq!(index.opportunity_count, 1);
        let entry = index.get("R1").expect("R1 present");
        assert_eq!(entry.route_ids, vec![String::from("X")]);
        assert_eq!(entry.name, "Central Station");

        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 0.0).expect("ok");
        assert_eq!(index.route_count("R1"), Some(0));
    }

    #[test]
    fn test_same_route_at_two_bus_stops_counts_once() {
        let rail = vec![StopPoint::located("R1", "Central", 0.0, 0.0)];
        let bus = vec![
            StopPoint::located("B1", "northbound", 20.0, 0.0),
            StopPoint::located("B2", "southbound", -20.0, 0.0),
        ];
        let arr = vec![TimetableEvent::arrival("R1", "301", t("08:00:00"))];
        let dep = vec![
            TimetableEvent::departure("B1", "X", t("08:02:00")),
            TimetableEvent::departure("B2", "X", t("08:04:00")),
        ];
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 6.0).expect("ok");
        assert_eq!(index.opportunity_count, 2);
        assert_eq!(index.route_count("R1"), Some(1));
    }

    #[test]
    fn test_corridor_counts() {
        let (rail, bus, arr, dep) = corridor();
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 250.0, 6.0).expect("ok");
        // R1 reaches B1 (7 @ 07:02, 8 @ 07:14) and B2 (7 @ 07:05)
        assert_eq!(index.get("R1").map(|e| e.route_ids.clone()), Some(vec![String::from("7"), String::from("8")]));
        // R2 reaches B3 (12 @ 07:11) and B4 (12 @ 07:21:30, 20 @ 07:03)
        assert_eq!(index.get("R2").map(|e| e.route_ids.clone()), Some(vec![String::from("12"), String::from("20")]));
        // B5 is 300m from R3
        assert_eq!(index.route_count("R3"), Some(0));
        assert_eq!(index.coverage, ScheduleCoverage::Served);
        assert_eq!(index.top_stations(1)[0].stop_id, "R1");
    }

    #[test]
    fn test_monotone_in_radius() {
        let (rail, bus, arr, dep) = corridor();
        let radii = [0.0, 10.0, 31.0, 100.0, 151.0, 200.0, 250.0, 400.0, 1000.0];
        let mut previous: Option<TransferIndex> = None;
        for radius in radii {
            let index = compute_transfer_index(&rail, &bus, &arr, &dep, radius, 6.0).expect("ok");
            if let Some(prev) = previous {
                assert!(prev.candidate_pair_count <= index.candidate_pair_count);
                for (stop_id, entry) in prev.entries.iter() {
                    let now = index.get(stop_id).expect("totality");
                    assert!(entry.distinct_route_count <= now.distinct_route_count, "{stop_id} at {radius}");
                    assert!(entry.route_ids.iter().all(|r| now.route_ids.contains(r)));
                }
            }
            previous = Some(index);
        }
    }

    #[test]
    fn test_monotone_in_wait_threshold() {
        let (rail, bus, arr, dep) = corridor();
        let thresholds = [0.0, 1.0, 1.5, 2.0, 4.0, 6.0, 9.0, 15.0, 60.0];
        let mut previous: Option<TransferIndex> = None;
        for minutes in thresholds {
            let index = compute_transfer_index(&rail, &bus, &arr, &dep, 400.0, minutes).expect("ok");
            if let Some(prev) = previous {
                assert!(prev.opportunity_count <= index.opportunity_count);
                for (stop_id, entry) in prev.entries.iter() {
                    let now = index.get(stop_id).expect("totality");
                    assert!(entry.distinct_route_count <= now.distinct_route_count, "{stop_id} at {minutes}");
                }
            }
            previous = Some(index);
        }
    }

    #[test]
    fn test_zero_radius_without_coincident_stops() {
        let (rail, bus, arr, dep) = corridor();
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 0.0, 60.0).expect("ok");
        assert!(index.entries.values().all(|e| e.distinct_route_count == 0));
        assert_eq!(index.candidate_pair_count, 0);
    }

    #[test]
    fn test_totality_with_empty_schedule() {
        let (rail, bus, _, _) = corridor();
        let index = compute_transfer_index(&rail, &bus, &[], &[], 500.0, 10.0).expect("ok");
        assert_eq!(
            index.entries.keys().collect_vec(),
            rail.iter().map(|s| &s.stop_id).sorted().collect_vec()
        );
        assert!(index.entries.values().all(|e| e.distinct_route_count == 0));
        assert_eq!(index.coverage, ScheduleCoverage::NoService);
        assert!(index.coverage.is_empty_schedule());
    }

    #[test]
    fn test_coverage_distinguishes_no_nearby_routes_from_no_service() {
        let (rail, bus, arr, dep) = single_station();
        // service exists, but nothing is close enough
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 10.0, 6.0).expect("ok");
        assert_eq!(index.route_count("R1"), Some(0));
        assert_eq!(index.coverage, ScheduleCoverage::Served);
        let index = compute_transfer_index(&rail, &bus, &[], &dep, 100.0, 6.0).expect("ok");
        assert_eq!(index.coverage, ScheduleCoverage::NoRailArrivals);
        let index = compute_transfer_index(&rail, &bus, &arr, &[], 100.0, 6.0).expect("ok");
        assert_eq!(index.coverage, ScheduleCoverage::NoBusDepartures);
    }

    #[test]
    fn test_totality_with_no_stops() {
        let index = compute_transfer_index(&[], &[], &[], &[], 100.0, 6.0).expect("ok");
        assert!(index.is_empty());
    }

    #[test]
    fn test_order_independence() {
        let (rail, bus, arr, dep) = corridor();
        let expected = compute_transfer_index(&rail, &bus, &arr, &dep, 250.0, 6.0).expect("ok");
        fn rev<T: Clone>(v: &[T]) -> Vec<T> {
            v.iter().rev().cloned().collect_vec()
        }
        let mut rotated = arr.clone();
        rotated.rotate_left(arr.len() / 3);
        let permuted =
            compute_transfer_index(&rev(&rail), &rev(&bus), &rotated, &rev(&dep), 250.0, 6.0)
                .expect("ok");
        assert_eq!(expected.counts(), permuted.counts());
        assert_eq!(expected.entries, permuted.entries);
        assert_eq!(expected.opportunity_count, permuted.opportunity_count);
    }

    #[test]
    fn test_rail_stop_without_coordinate_is_kept_and_reported() {
        let (mut rail, bus, arr, dep) = single_station();
        rail.push(StopPoint::new("R2", "Unmapped", None));
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 6.0).expect("ok");
        assert_eq!(index.route_count("R2"), Some(0));
        assert_eq!(index.excluded_stops.len(), 1);
        assert_eq!(index.excluded_stops[0].side, StopSide::Rail);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let (rail, bus, arr, dep) = single_station();
        assert!(matches!(
            compute_transfer_index(&rail, &bus, &arr, &dep, -5.0, 6.0),
            Err(TransferError::InvalidParameter { name: "buffer_radius", .. })
        ));
        assert!(matches!(
            compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, -1.0),
            Err(TransferError::InvalidParameter { name: "max_transfer_minutes", .. })
        ));
    }

    #[test]
    fn test_duplicate_stops_are_rejected() {
        let (mut rail, bus, arr, dep) = single_station();
        rail.push(StopPoint::located("R1", "again", 5.0, 5.0));
        assert!(matches!(
            compute_transfer_index(&rail, &bus, &arr, &dep, 100.0, 6.0),
            Err(TransferError::DuplicateStop { side: StopSide::Rail, .. })
        ));
    }

    #[test]
    fn test_event_kind_mismatch_is_rejected() {
        let (rail, bus, arr, dep) = single_station();
        let result = compute_transfer_index(&rail, &bus, &dep, &arr, 100.0, 6.0);
        assert!(matches!(
            result,
            Err(TransferError::EventKindMismatch { side: StopSide::Rail, found: EventKind::Departure, .. })
        ));
    }

    #[test]
    fn test_post_midnight_transfer() {
        let rail = vec![StopPoint::located("R1", "Terminal", 0.0, 0.0)];
        let bus = vec![StopPoint::located("B1", "Terminal bay", 10.0, 0.0)];
        let arr = vec![TimetableEvent::arrival("R1", "301", t("23:58:00"))];
        let dep = vec![
            TimetableEvent::departure("B1", "owl", t("24:05:00")),
            TimetableEvent::departure("B1", "early", t("00:01:00")),
        ];
        let index = compute_transfer_index(&rail, &bus, &arr, &dep, 50.0, 8.0).expect("ok");
        assert_eq!(index.get("R1").map(|e| e.route_ids.clone()), Some(vec![String::from("owl")]));
    }
}
