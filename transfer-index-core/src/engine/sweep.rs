use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TransferInputs;
use crate::{
    error::{validate_buffer_radius, validate_max_transfer_minutes, TransferError},
    model::{StopPoint, TimetableEvent, TransferIndex},
};

/// rail stop_id -> distinct bus route count.
pub type RouteCounts = BTreeMap<String, usize>;

/// one (radius, wait threshold) combination to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub buffer_radius: f64,
    pub max_transfer_minutes: f64,
}

impl SweepPoint {
    pub fn new(buffer_radius: f64, max_transfer_minutes: f64) -> SweepPoint {
        SweepPoint {
            buffer_radius,
            max_transfer_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), TransferError> {
        validate_buffer_radius(self.buffer_radius)?;
        validate_max_transfer_minutes(self.max_transfer_minutes)
    }
}

impl TransferInputs {
    /// evaluates every sweep point against this schedule snapshot. points are independent
    /// and run in parallel; results come back in the order of `points`.
    ///
    /// every point is validated before any work starts, so a bad value late in the list
    /// fails the sweep up front.
    pub fn sweep(
        &self,
        points: &[SweepPoint],
    ) -> Result<Vec<(SweepPoint, TransferIndex)>, TransferError> {
        self.sweep_with_progress(points, |_| {})
    }

    /// [`TransferInputs::sweep`], calling `on_point` from the worker thread as each point
    /// finishes, e.g. to advance a progress bar.
    pub fn sweep_with_progress<F>(
        &self,
        points: &[SweepPoint],
        on_point: F,
    ) -> Result<Vec<(SweepPoint, TransferIndex)>, TransferError>
    where
        F: Fn(&SweepPoint) + Sync,
    {
        for point in points.iter() {
            point.validate()?;
        }
        log::info!("evaluating {} sweep points", points.len());
        points
            .par_iter()
            .map(|point| {
                let index = self.evaluate(point.buffer_radius, point.max_transfer_minutes)?;
                on_point(point);
                Ok((*point, index))
            })
            .collect::<Result<Vec<_>, TransferError>>()
    }
}

/// evaluates the transfer index at each radius in `radii` with a fixed wait threshold.
///
/// # Returns
///
/// one [`RouteCounts`] per distinct radius, keyed by radius. repeated radii collapse to
/// a single key.
pub fn compute_transfer_index_sweep(
    rail_stops: &[StopPoint],
    bus_stops: &[StopPoint],
    rail_arrivals: &[TimetableEvent],
    bus_departures: &[TimetableEvent],
    radii: &[f64],
    max_transfer_minutes: f64,
) -> Result<BTreeMap<OrderedFloat<f64>, RouteCounts>, TransferError> {
    let inputs = TransferInputs::new(
        rail_stops.to_vec(),
        bus_stops.to_vec(),
        rail_arrivals,
        bus_departures,
    )?;
    let points = radii
        .iter()
        .map(|r| SweepPoint::new(*r, max_transfer_minutes))
        .collect::<Vec<_>>();
    let result = inputs
        .sweep(&points)?
        .into_iter()
        .map(|(point, index)| (OrderedFloat(point.buffer_radius), index.counts()))
        .collect();
    Ok(result)
}

/// evaluates the transfer index at each wait threshold in `thresholds` with a fixed
/// walking radius. keyed by threshold in minutes.
pub fn compute_transfer_minutes_sweep(
    rail_stops: &[StopPoint],
    bus_stops: &[StopPoint],
    rail_arrivals: &[TimetableEvent],
    bus_departures: &[TimetableEvent],
    buffer_radius: f64,
    thresholds: &[f64],
) -> Result<BTreeMap<OrderedFloat<f64>, RouteCounts>, TransferError> {
    let inputs = TransferInputs::new(
        rail_stops.to_vec(),
        bus_stops.to_vec(),
        rail_arrivals,
        bus_departures,
    )?;
    let points = thresholds
        .iter()
        .map(|m| SweepPoint::new(buffer_radius, *m))
        .collect::<Vec<_>>();
    let result = inputs
        .sweep(&points)?
        .into_iter()
        .map(|(point, index)| (OrderedFloat(point.max_transfer_minutes), index.counts()))
        .collect();
    Ok(result)
}
