use geo::Point;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ExcludedStop, ScheduleCoverage};

/// the transfer result for one rail stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferIndexEntry {
    pub stop_id: String,
    pub name: String,
    pub coordinate: Option<Point<f64>>,
    /// number of distinct bus routes with at least one qualifying transfer
    pub distinct_route_count: usize,
    /// the distinct bus route ids behind `distinct_route_count`, sorted
    pub route_ids: Vec<String>,
}

/// result of one analysis run: exactly one entry per rail stop supplied as input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferIndex {
    pub entries: BTreeMap<String, TransferIndexEntry>,
    pub coverage: ScheduleCoverage,
    pub excluded_stops: Vec<ExcludedStop>,
    pub candidate_pair_count: usize,
    /// transfer opportunities before distinct-route reduction
    pub opportunity_count: usize,
}

impl TransferIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, stop_id: &str) -> Option<&TransferIndexEntry> {
        self.entries.get(stop_id)
    }

    /// distinct route count for a rail stop. None if the stop was not part of the input.
    pub fn route_count(&self, stop_id: &str) -> Option<usize> {
        self.entries.get(stop_id).map(|e| e.distinct_route_count)
    }

    /// the stop_id -> count projection of this index.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.entries
            .iter()
            .map(|(id, e)| (id.clone(), e.distinct_route_count))
            .collect()
    }

    pub fn stops_with_transfers(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.distinct_route_count > 0)
            .count()
    }

    pub fn max_route_count(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.distinct_route_count)
            .max()
            .unwrap_or_default()
    }

    /// the `n` entries with the highest counts. ties are broken by stop_id so the
    /// ranking is stable.
    pub fn top_stations(&self, n: usize) -> Vec<&TransferIndexEntry> {
        self.entries
            .values()
            .sorted_by(|a, b| {
                b.distinct_route_count
                    .cmp(&a.distinct_route_count)
                    .then_with(|| a.stop_id.cmp(&b.stop_id))
            })
            .take(n)
            .collect_vec()
    }
}
