use std::collections::{BTreeMap, BTreeSet};

use crate::model::{StopPoint, TransferOpportunity};

/// left-outer reduction of transfer opportunities to the set of distinct bus routes per
/// rail stop. every rail stop appears in the result, with an empty set when nothing
/// qualified. opportunities for stops outside `rail_stops` are ignored.
pub fn distinct_routes_by_stop(
    rail_stops: &[StopPoint],
    opportunities: &[TransferOpportunity],
) -> BTreeMap<String, BTreeSet<String>> {
    let mut result: BTreeMap<String, BTreeSet<String>> = rail_stops
        .iter()
        .map(|s| (s.stop_id.clone(), BTreeSet::new()))
        .collect();
    let mut unknown = 0;
    for opp in opportunities.iter() {
        match result.get_mut(&opp.rail_stop_id) {
            Some(routes) => {
                routes.insert(opp.bus_route_id.clone());
            }
            None => unknown += 1,
        }
    }
    if unknown > 0 {
        log::warn!("ignored {unknown} transfer opportunities referencing unknown rail stops");
    }
    result
}

/// the count-only form of [`distinct_routes_by_stop`].
pub fn count_distinct_routes(
    rail_stops: &[StopPoint],
    opportunities: &[TransferOpportunity],
) -> BTreeMap<String, usize> {
    distinct_routes_by_stop(rail_stops, opportunities)
        .into_iter()
        .map(|(stop_id, routes)| (stop_id, routes.len()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counts_distinct_routes_only() {
        let rail = vec![StopPoint::located("R1", "a", 0.0, 0.0)];
        let opps = vec![
            TransferOpportunity::new("R1", "X"),
            TransferOpportunity::new("R1", "X"),
            TransferOpportunity::new("R1", "Y"),
            TransferOpportunity::new("R1", "X"),
        ];
        let counts = count_distinct_routes(&rail, &opps);
        assert_eq!(counts.get("R1"), Some(&2));
    }

    #[test]
    fn test_stops_without_opportunities_map_to_zero() {
        let rail = vec![
            StopPoint::located("R1", "a", 0.0, 0.0),
            StopPoint::new("R2", "b", None),
        ];
        let opps = vec![TransferOpportunity::new("R1", "X")];
        let counts = count_distinct_routes(&rail, &opps);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("R1"), Some(&1));
        assert_eq!(counts.get("R2"), Some(&0));
    }

    #[test]
    fn test_unknown_rail_stop_is_ignored() {
        let rail = vec![StopPoint::located("R1", "a", 0.0, 0.0)];
        let opps = vec![TransferOpportunity::new("R9", "X")];
        let counts = count_distinct_routes(&rail, &opps);
        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["R1"]);
        assert_eq!(counts.get("R1"), Some(&0));
    }
}
