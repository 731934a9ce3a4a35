use derive_more::{From, Into};
use geo_types::{Line, Point};
use serde::{Deserialize, Serialize};

use crate::{default, distance, Id};

use super::*;

/// Row position of a connector in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct ConnectorKey(pub usize);

/// Segment from a building to the closest point of its nearest road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub building_id: Id,
    pub road_id: Id,
    pub from: Point<f64>,
    pub to: Point<f64>,
}

impl Connector {
    pub fn line(&self) -> Line<f64> {
        Line::new(self.from, self.to)
    }

    pub fn length(&self) -> f64 {
        distance(self.from, self.to)
    }
}

/// Append-only output of a join.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connectors {
    pub building_id: Vec<Id>,
    pub road_id: Vec<Id>,
    pub from: Vec<Point<f64>>,
    pub to: Vec<Point<f64>>,
}

impl Connectors {
    pub fn len(&self) -> usize {
        self.building_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.building_id.is_empty()
    }

    pub fn get(&self, key: ConnectorKey) -> Option<Connector> {
        let i = key.0;
        Some(Connector {
            building_id: *self.building_id.get(i)?,
            road_id: *self.road_id.get(i)?,
            from: *self.from.get(i)?,
            to: *self.to.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Connector> + '_ {
        (0..self.len()).filter_map(|i| self.get(ConnectorKey(i)))
    }
}

impl FromIterator<Connector> for Connectors {
    fn from_iter<I: IntoIterator<Item = Connector>>(iter: I) -> Self {
        let mut slf: Self = default();
        slf.insert_many(iter);
        slf
    }
}

impl Insertable<Connector> for Connectors {
    type Key = ConnectorKey;

    fn insert(&mut self, data: Connector) -> Self::Key {
        self.building_id.push(data.building_id);
        self.road_id.push(data.road_id);
        self.from.push(data.from);
        self.to.push(data.to);
        ConnectorKey(self.building_id.len() - 1)
    }
}
