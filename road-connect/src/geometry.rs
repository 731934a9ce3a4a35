//! Planar point-to-segment and point-to-polyline projection on top of
//! `geo`.
//!
//! Every distance is euclidean in the shared planar reference of the
//! inputs.

use geo::{Closest, ClosestPoint, Distance, Euclidean};
use geo_types::{Coord, Line, LineString, Point};

/// Closest point on a segment or polyline to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub point: Point<f64>,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

impl Projection {
    pub fn distance_2(&self) -> f64 {
        self.distance * self.distance
    }
}

#[inline]
pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Euclidean.distance(a, b)
}

#[inline]
pub fn is_finite(c: Coord<f64>) -> bool {
    c.x.is_finite() && c.y.is_finite()
}

/// Clamped projection of `p` onto `segment`.
///
/// A degenerate segment (coincident endpoints) projects everything onto
/// its start point. So does a segment long enough that the projection
/// overflows, falling back to the nearer endpoint.
pub fn project(p: Point<f64>, segment: Line<f64>) -> Projection {
    let (start, end) = (segment.start_point(), segment.end_point());
    let point = match segment.closest_point(&p) {
        Closest::Intersection(q) | Closest::SinglePoint(q) if is_finite(q.0) => q,
        _ if distance(p, end) < distance(p, start) => end,
        _ => start,
    };
    Projection {
        point,
        distance: distance(p, point),
    }
}

/// Closest point on `polyline` to `p`, the minimum of [`project`] over
/// its segments. The earliest segment wins when two are equally close.
///
/// Returns `None` when the polyline has fewer than two points.
pub fn closest_on_polyline(p: Point<f64>, polyline: &LineString<f64>) -> Option<Projection> {
    polyline
        .lines()
        .map(|segment| project(p, segment))
        .fold(None, |best: Option<Projection>, candidate| match best {
            Some(b) if b.distance <= candidate.distance => Some(b),
            _ => Some(candidate),
        })
}
