use geo::BoundingRect;
use geo_types::{LineString, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use crate::{closest_on_polyline, Id, JoinError, Roads};

use super::NearestNeighbor;

/// A road stored in the R-tree, keyed by its bounding box.
#[derive(Debug, Clone)]
pub struct IndexedRoad {
    pub id: Id,
    pub geom: LineString<f64>,
    envelope: AABB<[f64; 2]>,
}

impl IndexedRoad {
    /// `None` if the geometry has no points to bound.
    pub fn new(id: Id, geom: LineString<f64>) -> Option<Self> {
        let rect = geom.bounding_rect()?;
        Some(Self {
            id,
            geom,
            envelope: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
        })
    }

    pub fn distance(&self, point: Point<f64>) -> f64 {
        closest_on_polyline(point, &self.geom).map_or(f64::INFINITY, |proj| proj.distance)
    }
}

impl RTreeObject for IndexedRoad {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedRoad {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d = self.distance(Point::new(point[0], point[1]));
        d * d
    }
}

/// R-tree over road envelopes, refined by exact point-to-polyline
/// distance. Never mutated after [`RoadIndex::build`], so it can be
/// queried from many threads without locking.
#[derive(Debug, Clone)]
pub struct RoadIndex {
    index: RTree<IndexedRoad>,
    tie_tolerance: f64,
}

impl RoadIndex {
    /// Bulk loads every road. Fails on the first malformed road or
    /// repeated id, an empty road set gives an empty index.
    pub fn build(roads: &Roads) -> Result<RoadIndex, JoinError> {
        roads.validate()?;
        let geomdata = roads
            .iter()
            .map(|(id, geom)| {
                IndexedRoad::new(id, geom.clone())
                    .ok_or(JoinError::MalformedRoad { id, points: 0 })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(roads = geomdata.len(), "built road index");
        Ok(RoadIndex {
            index: RTree::bulk_load(geomdata),
            tie_tolerance: 0.0,
        })
    }

    /// Like [`RoadIndex::build`] for callers that need at least one road.
    pub fn build_non_empty(roads: &Roads) -> Result<RoadIndex, JoinError> {
        if roads.is_empty() {
            return Err(JoinError::EmptyInput);
        }
        Self::build(roads)
    }

    /// Roads whose distance is within `tie_tolerance` of the nearest one
    /// count as tied.
    pub fn with_tie_tolerance(mut self, tie_tolerance: f64) -> Self {
        self.tie_tolerance = tie_tolerance;
        self
    }
}

impl NearestNeighbor for RoadIndex {
    fn nearest_road(&self, point: &Point<f64>) -> Option<(Id, &LineString<f64>)> {
        let query = [point.x(), point.y()];
        // yields in non-decreasing distance, so ties are adjacent
        let mut candidates = self
            .index
            .nearest_neighbor_iter(&query)
            .map(|road| (road, road.distance(*point)));
        let (first, best) = candidates.next()?;
        let limit = best + self.tie_tolerance;
        let winner = candidates
            .take_while(|(_, d)| *d <= limit)
            .fold(first, |acc, (road, _)| if road.id < acc.id { road } else { acc });
        Some((winner.id, &winner.geom))
    }

    fn len(&self) -> usize {
        self.index.size()
    }
}
