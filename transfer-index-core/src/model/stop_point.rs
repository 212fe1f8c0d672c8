use geo::Point;
use serde::{Deserialize, Serialize};

use super::ExclusionReason;

/// a stop with its location in a planar, length-preserving projection (metres).
///
/// the coordinate is optional so that stops with missing locations can still be
/// carried through to the output; they are skipped by proximity matching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    pub stop_id: String,
    pub name: String,
    pub coordinate: Option<Point<f64>>,
}

impl StopPoint {
    pub fn new(stop_id: &str, name: &str, coordinate: Option<Point<f64>>) -> StopPoint {
        StopPoint {
            stop_id: stop_id.to_string(),
            name: name.to_string(),
            coordinate,
        }
    }

    /// convenience constructor for a stop at planar coordinate (x, y).
    pub fn located(stop_id: &str, name: &str, x: f64, y: f64) -> StopPoint {
        StopPoint::new(stop_id, name, Some(Point::new(x, y)))
    }

    /// the coordinate usable for buffering, or the reason this stop cannot be matched.
    pub fn planar_coordinate(&self) -> Result<Point<f64>, ExclusionReason> {
        match self.coordinate {
            None => Err(ExclusionReason::MissingCoordinate),
            Some(p) if !p.x().is_finite() || !p.y().is_finite() => {
                Err(ExclusionReason::NonFiniteCoordinate)
            }
            Some(p) => Ok(p),
        }
    }
}
