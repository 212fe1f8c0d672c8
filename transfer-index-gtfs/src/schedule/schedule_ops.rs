use geo::Point;
use gtfs_structures::{Gtfs, GtfsReader, Stop};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};
use transfer_index_core::{
    model::{ScheduleCoverage, StopPoint, TimetableEvent},
    AnalysisConfig, TransferInputs,
};

use super::{
    batch_processing_error,
    mode_split::{ModeSplitConfig, TransitMode},
    raw_stop_time::{read_stop_times, ClockField},
    service_day::{active_service_ids, APP_DATE_FORMAT},
    LocalProjection, ScheduleError,
};

/// the engine inputs extracted from one GTFS feed for one service day and time window.
#[derive(Clone, Debug)]
pub struct LoadedSchedule {
    /// every stop served by a rail trip, sorted by stop_id, in planar metres
    pub rail_stops: Vec<StopPoint>,
    /// every stop served by a bus trip, sorted by stop_id, in planar metres
    pub bus_stops: Vec<StopPoint>,
    pub rail_arrivals: Vec<TimetableEvent>,
    pub bus_departures: Vec<TimetableEvent>,
    pub projection: LocalProjection,
    pub summary: LoadSummary,
}

impl LoadedSchedule {
    /// validates and indexes the schedule for evaluation.
    pub fn transfer_inputs(&self) -> Result<TransferInputs, ScheduleError> {
        let inputs = TransferInputs::new(
            self.rail_stops.clone(),
            self.bus_stops.clone(),
            &self.rail_arrivals,
            &self.bus_departures,
        )?;
        Ok(inputs)
    }

    pub fn coverage(&self) -> ScheduleCoverage {
        ScheduleCoverage::from_event_counts(self.rail_arrivals.len(), self.bus_departures.len())
    }

    /// WGS84 location of a rail stop, if it has one.
    pub fn rail_stop_location(&self, stop: &StopPoint) -> Option<Point<f64>> {
        stop.coordinate.map(|p| self.projection.unproject(&p))
    }
}

/// counters collected while loading, reported alongside the analysis results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub active_service_ids: Vec<String>,
    pub active_rail_trips: usize,
    pub active_bus_trips: usize,
    pub rail_stops: usize,
    pub bus_stops: usize,
    pub rail_arrivals: usize,
    pub bus_departures: usize,
    /// stop times of active trips with an empty clock field
    pub missing_times: usize,
    /// stop times of active trips whose clock field could not be parsed
    pub malformed_times: usize,
    /// stops with no coordinate of their own or of their parent station
    pub stops_missing_coordinates: usize,
    /// stop_times rows whose trip_id is not in trips.txt
    pub unknown_trip_references: usize,
    /// stop_ids referenced by stop_times.txt but absent from stops.txt
    pub unknown_stop_references: usize,
    /// stop_times.txt rows that could not be read at all
    pub unreadable_stop_time_rows: usize,
}

struct TripInfo<'a> {
    route_id: &'a str,
    mode: TransitMode,
    active: bool,
}

/// reads a GTFS feed (zip archive or extracted directory) into rail and bus stops and
/// the timetable events of the configured service day and time window.
///
/// rail arrivals use `arrival_time` and bus departures use `departure_time`; both are
/// kept when inside the inclusive window. stop sets are built from all trips in the
/// feed, so a day without service still reports every rail station.
///
/// # Arguments
///
/// * `feed_path`  - location of the GTFS zip archive or directory
/// * `analysis`   - service date and time window
/// * `mode_split` - which routes count as rail and which as bus
pub fn load_schedule(
    feed_path: &Path,
    analysis: &AnalysisConfig,
    mode_split: &ModeSplitConfig,
) -> Result<LoadedSchedule, ScheduleError> {
    analysis.validate()?;
    let path_str = feed_path.to_str().ok_or_else(|| {
        ScheduleError::InvalidData(format!(
            "feed path is not valid unicode: {}",
            feed_path.display()
        ))
    })?;
    let gtfs = GtfsReader::default()
        .read_stop_times(false)
        .read_shapes(false)
        .read(path_str)?;
    log::info!(
        "read GTFS feed {}: {} routes, {} trips, {} stops",
        feed_path.display(),
        gtfs.routes.len(),
        gtfs.trips.len(),
        gtfs.stops.len()
    );
    validate_rail_route_ids(&gtfs, mode_split)?;
    let stop_times = read_stop_times(feed_path)?;

    let service_date = &analysis.service_date;
    let window = &analysis.time_window;
    let active_services = active_service_ids(&gtfs, service_date);
    log::info!(
        "{} active service ids on {}",
        active_services.len(),
        service_date.format(APP_DATE_FORMAT)
    );

    let classifier = mode_split.classifier();
    let mut summary = LoadSummary {
        active_service_ids: active_services.iter().cloned().collect(),
        unreadable_stop_time_rows: stop_times.skipped_rows,
        ..Default::default()
    };
    let mut unknown_routes = BTreeSet::new();
    let mut trips: HashMap<&str, TripInfo> = HashMap::new();
    for trip in gtfs.trips.values() {
        let route = match gtfs.routes.get(&trip.route_id) {
            Some(route) => route,
            None => {
                unknown_routes.insert(trip.route_id.as_str());
                continue;
            }
        };
        let mode = match classifier.classify(route) {
            Some(mode) => mode,
            None => continue,
        };
        let active = active_services.contains(&trip.service_id);
        if active {
            match mode {
                TransitMode::Rail => summary.active_rail_trips += 1,
                TransitMode::Bus => summary.active_bus_trips += 1,
            }
        }
        trips.insert(
            trip.id.as_str(),
            TripInfo {
                route_id: trip.route_id.as_str(),
                mode,
                active,
            },
        );
    }
    if !unknown_routes.is_empty() {
        log::warn!(
            "ignoring trips that reference {} route ids missing from routes.txt",
            unknown_routes.len()
        );
    }

    let mut rail_stop_ids = BTreeSet::new();
    let mut bus_stop_ids = BTreeSet::new();
    let mut rail_arrivals = vec![];
    let mut bus_departures = vec![];
    for row in stop_times.rows.iter() {
        let trip = match trips.get(row.trip_id.as_str()) {
            Some(trip) => trip,
            None => {
                if !gtfs.trips.contains_key(&row.trip_id) {
                    summary.unknown_trip_references += 1;
                }
                continue;
            }
        };
        let clock = match trip.mode {
            TransitMode::Rail => {
                rail_stop_ids.insert(row.stop_id.as_str());
                row.arrival()
            }
            TransitMode::Bus => {
                bus_stop_ids.insert(row.stop_id.as_str());
                row.departure()
            }
        };
        if !trip.active {
            continue;
        }
        match clock {
            ClockField::Valid(time) if window.contains(&time) => match trip.mode {
                TransitMode::Rail => rail_arrivals.push(TimetableEvent::arrival(
                    &row.stop_id,
                    trip.route_id,
                    time,
                )),
                TransitMode::Bus => bus_departures.push(TimetableEvent::departure(
                    &row.stop_id,
                    trip.route_id,
                    time,
                )),
            },
            ClockField::Valid(_) => {}
            ClockField::Missing => summary.missing_times += 1,
            ClockField::Malformed => summary.malformed_times += 1,
        }
    }
    if summary.unknown_trip_references > 0 {
        log::warn!(
            "{} stop_times rows reference trips missing from trips.txt",
            summary.unknown_trip_references
        );
    }
    if summary.malformed_times > 0 {
        log::warn!(
            "skipped {} stop times with malformed clock values",
            summary.malformed_times
        );
    }
    if rail_stop_ids.is_empty() {
        log::warn!("no rail stops found, check the rail route ids / route types");
    }

    let rail_locations = locate_stops(&gtfs, &rail_stop_ids, &mut summary);
    let bus_locations = locate_stops(&gtfs, &bus_stop_ids, &mut summary);
    let projection =
        LocalProjection::centred_on(rail_locations.iter().filter_map(|(_, p)| p.as_ref()))
            .or_else(|| {
                LocalProjection::centred_on(bus_locations.iter().filter_map(|(_, p)| p.as_ref()))
            })
            .unwrap_or_else(|| LocalProjection::new(Point::new(0.0, 0.0)));
    let rail_stops = to_stop_points(&rail_locations, &projection);
    let bus_stops = to_stop_points(&bus_locations, &projection);

    summary.rail_stops = rail_stops.len();
    summary.bus_stops = bus_stops.len();
    summary.rail_arrivals = rail_arrivals.len();
    summary.bus_departures = bus_departures.len();
    log::info!(
        "loaded {} rail stops with {} arrivals and {} bus stops with {} departures in window {}",
        summary.rail_stops,
        summary.rail_arrivals,
        summary.bus_stops,
        summary.bus_departures,
        window
    );

    Ok(LoadedSchedule {
        rail_stops,
        bus_stops,
        rail_arrivals,
        bus_departures,
        projection,
        summary,
    })
}

/// explicitly listed rail routes must all exist in the feed.
fn validate_rail_route_ids(gtfs: &Gtfs, mode_split: &ModeSplitConfig) -> Result<(), ScheduleError> {
    let errors = mode_split
        .rail_route_ids
        .iter()
        .filter(|id| !gtfs.routes.contains_key(*id))
        .map(|id| ScheduleError::InvalidData(format!("rail route id '{id}' not found in routes.txt")))
        .collect::<Vec<_>>();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(batch_processing_error(&errors))
    }
}

/// looks up each stop with its WGS84 location. unknown stop ids are dropped.
fn locate_stops<'a>(
    gtfs: &'a Gtfs,
    stop_ids: &BTreeSet<&str>,
    summary: &mut LoadSummary,
) -> Vec<(&'a Stop, Option<Point<f64>>)> {
    let mut result = vec![];
    for stop_id in stop_ids.iter() {
        match gtfs.stops.get(*stop_id) {
            Some(stop) => {
                let location = get_stop_location(stop, gtfs);
                if location.is_none() {
                    log::warn!("stop '{stop_id}' has no location and no located parent station");
                    summary.stops_missing_coordinates += 1;
                }
                result.push((stop.as_ref(), location));
            }
            None => {
                log::warn!("stop '{stop_id}' referenced by stop_times.txt is missing from stops.txt");
                summary.unknown_stop_references += 1;
            }
        }
    }
    result
}

fn to_stop_points(
    located: &[(&Stop, Option<Point<f64>>)],
    projection: &LocalProjection,
) -> Vec<StopPoint> {
    located
        .iter()
        .map(|(stop, location)| {
            let name = stop.name.clone().unwrap_or_default();
            let planar = location.map(|p| projection.project(&p));
            StopPoint::new(&stop.id, &name, planar)
        })
        .collect()
}

/// the stop's own lon,lat, or its parent station's when the stop has none. only one
/// level of parent is followed.
fn get_stop_location(stop: &Stop, gtfs: &Gtfs) -> Option<Point<f64>> {
    if let (Some(lon), Some(lat)) = (stop.longitude, stop.latitude) {
        return Some(Point::new(lon, lat));
    }
    stop.parent_station
        .as_ref()
        .and_then(|parent_id| gtfs.stops.get(parent_id))
        .and_then(
            |parent_stop| match (parent_stop.longitude, parent_stop.latitude) {
                (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
                _ => None,
            },
        )
}
