use geo::{Bearing, Destination, Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// local azimuthal-equidistant projection of WGS84 (lon, lat) points onto a plane in
/// metres. distances and bearings from the origin are exact on the haversine sphere;
/// distances between two points away from the origin are distorted by well under a
/// percent across a metropolitan area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalProjection {
    origin: Point<f64>,
}

impl LocalProjection {
    pub fn new(origin: Point<f64>) -> LocalProjection {
        LocalProjection { origin }
    }

    /// centres the projection on the mean of the given points. non-finite points are
    /// skipped. None if no usable point remains.
    pub fn centred_on<'a>(points: impl IntoIterator<Item = &'a Point<f64>>) -> Option<LocalProjection> {
        let (sum_x, sum_y, n) = points
            .into_iter()
            .filter(|p| p.x().is_finite() && p.y().is_finite())
            .fold((0.0, 0.0, 0usize), |(x, y, n), p| (x + p.x(), y + p.y(), n + 1));
        if n == 0 {
            None
        } else {
            let origin = Point::new(sum_x / n as f64, sum_y / n as f64);
            Some(LocalProjection::new(origin))
        }
    }

    pub fn origin(&self) -> Point<f64> {
        self.origin
    }

    /// WGS84 (lon, lat) to planar (x east, y north) metres.
    pub fn project(&self, wgs84: &Point<f64>) -> Point<f64> {
        let distance = Haversine.distance(self.origin, *wgs84);
        if distance == 0.0 {
            return Point::new(0.0, 0.0);
        }
        let bearing = Haversine.bearing(self.origin, *wgs84).to_radians();
        Point::new(distance * bearing.sin(), distance * bearing.cos())
    }

    /// planar metres back to WGS84 (lon, lat).
    pub fn unproject(&self, planar: &Point<f64>) -> Point<f64> {
        let distance = planar.x().hypot(planar.y());
        if distance == 0.0 {
            return self.origin;
        }
        let bearing = planar.x().atan2(planar.y()).to_degrees();
        Haversine.destination(self.origin, bearing, distance)
    }
}
