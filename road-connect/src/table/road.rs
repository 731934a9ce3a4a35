use std::collections::HashSet;

use geo::{Closest, ClosestPoint};
use geo_types::{LineString, Point};

use crate::{closest_on_polyline, default, is_finite, Id, JoinError, Layer};

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: Id,
    pub geom: LineString<f64>,
}

impl Road {
    pub fn new(id: Id, geom: LineString<f64>) -> Self {
        Self { id, geom }
    }

    /// Checks that the geometry is a usable polyline.
    pub fn validate(&self) -> Result<(), JoinError> {
        validate_polyline(self.id, &self.geom)
    }
}

pub(crate) fn validate_polyline(id: Id, geom: &LineString<f64>) -> Result<(), JoinError> {
    let points = geom.0.len();
    if points < 2 {
        return Err(JoinError::MalformedRoad { id, points });
    }
    if !geom.0.iter().copied().all(is_finite) {
        return Err(JoinError::NonFiniteRoad { id });
    }
    Ok(())
}

impl ClosestPoint<f64> for Road {
    fn closest_point(&self, p: &Point<f64>) -> Closest<f64> {
        match closest_on_polyline(*p, &self.geom) {
            Some(proj) if proj.distance == 0.0 => Closest::Intersection(proj.point),
            Some(proj) => Closest::SinglePoint(proj.point),
            None => Closest::Indeterminate,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Roads {
    pub id: Vec<Id>, // Primary key
    pub geom: Vec<LineString<f64>>,
}

impl Roads {
    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &LineString<f64>)> {
        self.id.iter().copied().zip(self.geom.iter())
    }

    /// Rejects the first road, in table order, that is malformed or
    /// repeats an earlier id.
    pub fn validate(&self) -> Result<(), JoinError> {
        let mut seen = HashSet::with_capacity(self.len());
        for (id, geom) in self.iter() {
            validate_polyline(id, geom)?;
            if !seen.insert(id) {
                return Err(JoinError::DuplicateId {
                    layer: Layer::Roads,
                    id,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Road> for Roads {
    fn from_iter<I: IntoIterator<Item = Road>>(iter: I) -> Self {
        let mut slf: Self = default();
        slf.insert_many(iter);
        slf
    }
}

impl Insertable<Road> for Roads {
    type Key = Id;

    // Duplicates are kept so that `validate` can report them
    fn insert(&mut self, data: Road) -> Self::Key {
        self.id.push(data.id);
        self.geom.push(data.geom);
        data.id
    }
}
