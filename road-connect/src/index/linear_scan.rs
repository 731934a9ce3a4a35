use geo_types::{LineString, Point};

use crate::{closest_on_polyline, Id, JoinError, Roads};

use super::NearestNeighbor;

/// Exhaustive scan over every road. Same answers as
/// [`RoadIndex`](super::RoadIndex), cheaper to build for a handful of
/// roads.
#[derive(Debug, Clone, Default)]
pub struct LinearScan {
    roads: Vec<(Id, LineString<f64>)>,
    tie_tolerance: f64,
}

impl LinearScan {
    pub fn build(roads: &Roads) -> Result<LinearScan, JoinError> {
        roads.validate()?;
        Ok(LinearScan {
            roads: roads.iter().map(|(id, geom)| (id, geom.clone())).collect(),
            tie_tolerance: 0.0,
        })
    }

    pub fn with_tie_tolerance(mut self, tie_tolerance: f64) -> Self {
        self.tie_tolerance = tie_tolerance;
        self
    }
}

impl NearestNeighbor for LinearScan {
    fn nearest_road(&self, point: &Point<f64>) -> Option<(Id, &LineString<f64>)> {
        let distances: Vec<f64> = self
            .roads
            .iter()
            .map(|(_, geom)| {
                closest_on_polyline(*point, geom).map_or(f64::INFINITY, |proj| proj.distance)
            })
            .collect();
        let best = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let limit = best + self.tie_tolerance;

        self.roads
            .iter()
            .zip(distances)
            .filter(|(_, d)| *d <= limit)
            .map(|((id, geom), _)| (*id, geom))
            .min_by_key(|(id, _)| *id)
    }

    fn len(&self) -> usize {
        self.roads.len()
    }
}
