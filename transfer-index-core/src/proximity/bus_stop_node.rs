use rstar::{PointDistance, RTreeObject, AABB};

/// R-tree node for a located bus stop. `index` refers back into the slice of stops
/// the tree was built from.
#[derive(Clone, Debug)]
pub struct BusStopNode {
    pub index: usize,
    point: [f64; 2],
}

impl BusStopNode {
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self {
            index,
            point: [x, y],
        }
    }
}

impl RTreeObject for BusStopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BusStopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
