use std::collections::HashSet;

use geo_types::Point;

use crate::{default, is_finite, Id, JoinError, Layer};

use super::*;

/// A building reduced to its representative point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub id: Id,
    pub geom: Point<f64>,
}

impl Building {
    pub fn new(id: Id, geom: Point<f64>) -> Self {
        Self { id, geom }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buildings {
    pub id: Vec<Id>, // Primary key
    pub geom: Vec<Point<f64>>,
}

impl Buildings {
    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Building> + '_ {
        self.id
            .iter()
            .zip(self.geom.iter())
            .map(|(&id, &geom)| Building { id, geom })
    }

    pub fn row(&self, index: usize) -> Option<Building> {
        Some(Building {
            id: *self.id.get(index)?,
            geom: *self.geom.get(index)?,
        })
    }

    /// Rejects the first building, in table order, with a non-finite
    /// point or an id seen before.
    pub fn validate(&self) -> Result<(), JoinError> {
        let mut seen = HashSet::with_capacity(self.len());
        for Building { id, geom } in self.iter() {
            if !is_finite(geom.0) {
                return Err(JoinError::MalformedBuilding { id });
            }
            if !seen.insert(id) {
                return Err(JoinError::DuplicateId {
                    layer: Layer::Buildings,
                    id,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Building> for Buildings {
    fn from_iter<I: IntoIterator<Item = Building>>(iter: I) -> Self {
        let mut slf: Self = default();
        slf.insert_many(iter);
        slf
    }
}

impl Insertable<Building> for Buildings {
    type Key = Id;

    fn insert(&mut self, data: Building) -> Self::Key {
        self.id.push(data.id);
        self.geom.push(data.geom);
        data.id
    }
}
