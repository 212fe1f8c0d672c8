use itertools::Itertools;
use kdam::{Bar, BarBuilder, BarExt};
use ordered_float::OrderedFloat;
use std::sync::{Arc, Mutex};
use transfer_index_core::{model::ScheduleCoverage, SweepPoint};
use transfer_index_gtfs::schedule::{load_schedule, LoadedSchedule};

use super::{TransferAppConfig, TransferAppError};
use crate::output::{
    create_dirs, sweep_label, write_json, write_sweep_csv, write_toml, write_transfer_index_csv,
    write_transfer_index_geojson, AnalysisSummary, SweepPointSummary, SweepSummary,
};

pub const TRANSFER_INDEX_CSV: &str = "transfer_index.csv";
pub const TRANSFER_INDEX_GEOJSON: &str = "transfer_index.geojson";
pub const ANALYSIS_SUMMARY_JSON: &str = "analysis_summary.json";
pub const SWEEP_CSV: &str = "transfer_index_sweep.csv";
pub const SWEEP_SUMMARY_JSON: &str = "sweep_summary.json";
pub const CONFIG_TOML: &str = "transfer_index_config.toml";

/// runs the single-point analysis and writes the CSV, GeoJSON and JSON summary outputs
/// along with the resolved configuration.
pub fn run_analysis(conf: &TransferAppConfig) -> Result<AnalysisSummary, TransferAppError> {
    let schedule = load(conf)?;
    let inputs = schedule.transfer_inputs()?;
    let index = inputs.evaluate(
        conf.analysis.buffer_radius,
        conf.analysis.max_transfer_minutes,
    )?;
    warn_on_empty_schedule(conf, index.coverage, &schedule.summary.active_service_ids);
    for excluded in index.excluded_stops.iter() {
        log::warn!("{excluded}");
    }

    let out = conf.output_directory.as_path();
    create_dirs(out)?;
    write_transfer_index_csv(&index, out, TRANSFER_INDEX_CSV, conf.overwrite)?;
    write_transfer_index_geojson(
        &index,
        &schedule.projection,
        out,
        TRANSFER_INDEX_GEOJSON,
        conf.overwrite,
    )?;
    let summary = AnalysisSummary::new(&conf.gtfs, &conf.analysis, &index, &schedule.summary);
    write_json(&summary, out, ANALYSIS_SUMMARY_JSON, conf.overwrite)?;
    write_toml(conf, out, CONFIG_TOML, conf.overwrite)?;
    Ok(summary)
}

/// evaluates every (radius, wait threshold) point of the configured sweep against one
/// schedule snapshot, writing a combined table, one table per point and a summary.
pub fn run_sweep(conf: &TransferAppConfig) -> Result<SweepSummary, TransferAppError> {
    let points = conf.sweep.points(&conf.analysis);
    for point in points.iter() {
        point.validate()?;
    }
    let schedule = load(conf)?;
    let inputs = schedule.transfer_inputs()?;
    warn_on_empty_schedule(conf, inputs.coverage(), &schedule.summary.active_service_ids);

    // a progress bar shared across threads
    let bar: Arc<Mutex<Bar>> = Arc::new(Mutex::new(
        BarBuilder::default()
            .desc("transfer index sweep")
            .total(points.len())
            .animation("fillup")
            .build()
            .map_err(|e| {
                TransferAppError::InternalError(format!("failure building progress bar: {e}"))
            })?,
    ));
    let results = inputs.sweep_with_progress(&points, |_| {
        if let Ok(mut bar) = bar.lock() {
            let _ = bar.update(1);
        }
    })?;
    eprintln!(); // end progress bar

    let (vary_radius, vary_minutes) = varying_parameters(&points);
    let labelled = results
        .into_iter()
        .map(|(point, index)| (sweep_label(&point, vary_radius, vary_minutes), point, index))
        .collect_vec();

    let out = conf.output_directory.as_path();
    create_dirs(out)?;
    let tables = labelled
        .iter()
        .map(|(label, _, index)| (label.clone(), index.clone()))
        .collect_vec();
    write_sweep_csv(&tables, out, SWEEP_CSV, conf.overwrite)?;
    for (label, _, index) in labelled.iter() {
        let filename = format!("transfer_index_{label}.csv");
        write_transfer_index_csv(index, out, &filename, conf.overwrite)?;
    }

    let point_summaries = labelled
        .iter()
        .map(|(label, point, index)| SweepPointSummary::new(label, point, index))
        .collect_vec();
    let summary = SweepSummary::new(
        &conf.gtfs,
        &conf.analysis,
        schedule.rail_stops.len(),
        inputs.coverage(),
        point_summaries,
        &schedule.summary,
    );
    write_json(&summary, out, SWEEP_SUMMARY_JSON, conf.overwrite)?;
    write_toml(conf, out, CONFIG_TOML, conf.overwrite)?;
    Ok(summary)
}

/// reports the headline numbers of an analysis at info level.
pub fn log_summary(summary: &AnalysisSummary) {
    log::info!(
        "{} of {} rail stops have a bus transfer within {}m and {} minutes on {} ({})",
        summary.stops_with_transfers,
        summary.total_rail_stops,
        summary.buffer_metres,
        summary.max_transfer_minutes,
        summary.service_date,
        summary.time_window
    );
    log::info!(
        "max routes at one stop: {}, transfer opportunities: {}",
        summary.max_routes_at_stop,
        summary.total_transfer_opportunities
    );
    for (rank, station) in summary.top_stations.iter().enumerate() {
        log::info!(
            "  {}. {} ({}): {} routes",
            rank + 1,
            station.stop_name,
            station.stop_id,
            station.bus_xfer_routes
        );
    }
}

fn load(conf: &TransferAppConfig) -> Result<LoadedSchedule, TransferAppError> {
    let feed_path = conf.feed_source().resolve(conf.force_download)?;
    let schedule = load_schedule(&feed_path, &conf.analysis, &conf.mode_split)?;
    log::info!(
        "loaded {} rail stops, {} bus stops, {} rail arrivals and {} bus departures",
        schedule.rail_stops.len(),
        schedule.bus_stops.len(),
        schedule.rail_arrivals.len(),
        schedule.bus_departures.len()
    );
    if schedule.rail_stops.is_empty() {
        log::warn!("no rail stops found in the feed, check the mode split configuration");
    }
    Ok(schedule)
}

fn warn_on_empty_schedule(
    conf: &TransferAppConfig,
    coverage: ScheduleCoverage,
    active_service_ids: &[String],
) {
    if let Some(message) = empty_schedule_message(conf, coverage, active_service_ids) {
        log::warn!("{message}");
    }
}

/// explains an empty schedule. a date with no active service ids is reported as a
/// possible holiday or non-service day, kept apart from a running service that simply
/// has no events inside the time window.
fn empty_schedule_message(
    conf: &TransferAppConfig,
    coverage: ScheduleCoverage,
    active_service_ids: &[String],
) -> Option<String> {
    let date = conf.analysis.service_date;
    let window = conf.analysis.time_window;
    match coverage {
        ScheduleCoverage::Served => None,
        _ if active_service_ids.is_empty() => Some(format!(
            "no service found on {date}; it may be a holiday or non-service day. \
             every rail stop will report 0 transfer routes"
        )),
        ScheduleCoverage::NoService => Some(format!(
            "service runs on {date} ({} active service ids) but no rail arrivals or bus \
             departures fall between {window}, every rail stop will report 0 transfer routes",
            active_service_ids.len()
        )),
        ScheduleCoverage::NoRailArrivals | ScheduleCoverage::NoBusDepartures => Some(format!(
            "{coverage} on {date} between {window}, every rail stop will report 0 transfer routes"
        )),
    }
}

/// whether the sweep holds more than one radius and more than one wait threshold.
fn varying_parameters(points: &[SweepPoint]) -> (bool, bool) {
    let radii = points
        .iter()
        .map(|p| OrderedFloat(p.buffer_radius))
        .unique()
        .count();
    let minutes = points
        .iter()
        .map(|p| OrderedFloat(p.max_transfer_minutes))
        .unique()
        .count();
    (radii > 1 || minutes <= 1, minutes > 1)
}
