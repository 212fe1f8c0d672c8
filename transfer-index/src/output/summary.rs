use serde::{Deserialize, Serialize};
use transfer_index_core::{
    model::{ExcludedStop, ScheduleCoverage, TransferIndex, TransferIndexEntry},
    AnalysisConfig, SweepPoint,
};
use transfer_index_gtfs::schedule::LoadSummary;

/// stations listed in a summary, highest count first
pub const TOP_STATION_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub stop_id: String,
    pub stop_name: String,
    pub bus_xfer_routes: usize,
}

impl From<&TransferIndexEntry> for StationSummary {
    fn from(entry: &TransferIndexEntry) -> Self {
        StationSummary {
            stop_id: entry.stop_id.clone(),
            stop_name: entry.name.clone(),
            bus_xfer_routes: entry.distinct_route_count,
        }
    }
}

/// written as `analysis_summary.json` by the `run` operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// local time the summary was created (RFC 3339)
    pub created: String,
    pub feed: String,
    pub service_date: String,
    pub time_window: String,
    pub buffer_metres: f64,
    pub max_transfer_minutes: f64,
    pub total_rail_stops: usize,
    pub stops_with_transfers: usize,
    pub max_routes_at_stop: usize,
    /// qualifying (arrival, departure) combinations before route de-duplication
    pub total_transfer_opportunities: usize,
    pub coverage: ScheduleCoverage,
    pub top_stations: Vec<StationSummary>,
    pub excluded_stops: Vec<ExcludedStop>,
    pub load: LoadSummary,
}

impl AnalysisSummary {
    pub fn new(
        feed: &str,
        analysis: &AnalysisConfig,
        index: &TransferIndex,
        load: &LoadSummary,
    ) -> AnalysisSummary {
        AnalysisSummary {
            created: chrono::Local::now().to_rfc3339(),
            feed: feed.to_string(),
            service_date: analysis.service_date.to_string(),
            time_window: analysis.time_window.to_string(),
            buffer_metres: analysis.buffer_radius,
            max_transfer_minutes: analysis.max_transfer_minutes,
            total_rail_stops: index.len(),
            stops_with_transfers: index.stops_with_transfers(),
            max_routes_at_stop: index.max_route_count(),
            total_transfer_opportunities: index.opportunity_count,
            coverage: index.coverage,
            top_stations: index
                .top_stations(TOP_STATION_COUNT)
                .into_iter()
                .map(StationSummary::from)
                .collect(),
            excluded_stops: index.excluded_stops.clone(),
            load: load.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPointSummary {
    pub label: String,
    pub buffer_radius: f64,
    pub max_transfer_minutes: f64,
    pub stops_with_transfers: usize,
    pub max_routes_at_stop: usize,
    pub total_transfer_opportunities: usize,
}

impl SweepPointSummary {
    pub fn new(label: &str, point: &SweepPoint, index: &TransferIndex) -> SweepPointSummary {
        SweepPointSummary {
            label: label.to_string(),
            buffer_radius: point.buffer_radius,
            max_transfer_minutes: point.max_transfer_minutes,
            stops_with_transfers: index.stops_with_transfers(),
            max_routes_at_stop: index.max_route_count(),
            total_transfer_opportunities: index.opportunity_count,
        }
    }
}

/// written as `sweep_summary.json` by the `sweep` operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub created: String,
    pub feed: String,
    pub service_date: String,
    pub time_window: String,
    pub total_rail_stops: usize,
    pub coverage: ScheduleCoverage,
    pub points: Vec<SweepPointSummary>,
    pub load: LoadSummary,
}

impl SweepSummary {
    pub fn new(
        feed: &str,
        analysis: &AnalysisConfig,
        total_rail_stops: usize,
        coverage: ScheduleCoverage,
        points: Vec<SweepPointSummary>,
        load: &LoadSummary,
    ) -> SweepSummary {
        SweepSummary {
            created: chrono::Local::now().to_rfc3339(),
            feed: feed.to_string(),
            service_date: analysis.service_date.to_string(),
            time_window: analysis.time_window.to_string(),
            total_rail_stops,
            coverage,
            points,
            load: load.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::Point;
    use transfer_index_core::model::{ExclusionReason, StopSide};

    fn entry(stop_id: &str, count: usize) -> TransferIndexEntry {
        TransferIndexEntry {
            stop_id: stop_id.to_string(),
            name: format!("{stop_id} Station"),
            coordinate: Some(Point::new(0.0, 0.0)),
            distinct_route_count: count,
            route_ids: (0..count).map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn test_analysis_summary_statistics() {
        let entries = [
            entry("A", 3),
            entry("B", 0),
            entry("C", 5),
            entry("D", 3),
            entry("E", 1),
            entry("F", 2),
            entry("G", 0),
        ]
        .into_iter()
        .map(|e| (e.stop_id.clone(), e))
        .collect();
        let index = TransferIndex {
            entries,
            coverage: ScheduleCoverage::Served,
            excluded_stops: vec![ExcludedStop {
                stop_id: String::from("X"),
                side: StopSide::Bus,
                reason: ExclusionReason::MissingCoordinate,
            }],
            candidate_pair_count: 12,
            opportunity_count: 40,
        };
        let summary = AnalysisSummary::new(
            "feed.zip",
            &AnalysisConfig::default(),
            &index,
            &LoadSummary::default(),
        );
        assert_eq!(summary.service_date, "2025-06-10");
        assert_eq!(summary.time_window, "07:00:00 - 09:00:00");
        assert_eq!(summary.total_rail_stops, 7);
        assert_eq!(summary.stops_with_transfers, 5);
        assert_eq!(summary.max_routes_at_stop, 5);
        assert_eq!(summary.total_transfer_opportunities, 40);
        assert_eq!(summary.excluded_stops.len(), 1);
        let top = summary
            .top_stations
            .iter()
            .map(|s| s.stop_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(top, vec!["C", "A", "D", "F", "E"]);
    }
}
