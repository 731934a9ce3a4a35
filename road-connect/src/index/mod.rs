mod linear_scan;
mod road_index;
pub use linear_scan::*;
pub use road_index::*;

use geo_types::{LineString, Point};

use crate::{closest_on_polyline, Id};

/// Lookup of the road nearest to a query point.
///
/// Distance is measured from the point to the closest point on the whole
/// polyline. Among equally near roads the lowest id is returned.
pub trait NearestNeighbor {
    /// The nearest road and its geometry, `None` when nothing is indexed.
    fn nearest_road(&self, point: &Point<f64>) -> Option<(Id, &LineString<f64>)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn nearest(&self, point: &Point<f64>) -> Option<Id> {
        self.nearest_road(point).map(|(id, _)| id)
    }

    /// The nearest road together with the closest point lying on it.
    fn nearest_neighbor_road(&self, point: &Point<f64>) -> Option<(Id, Point<f64>)> {
        let (id, geom) = self.nearest_road(point)?;
        closest_on_polyline(*point, geom).map(|proj| (id, proj.point))
    }
}
