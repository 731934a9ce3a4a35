//! GeoJSON layers in and out of the join.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geo_types::{Coord, LineString, Point};
use geojson::{feature::Id as FeatureId, Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use road_connect::{Building, Buildings, Connector, Connectors, Id, JoinError, Road, Roads};

pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let geojson: GeoJson = text
        .parse()
        .with_context(|| format!("failed to parse {} as GeoJSON", path.display()))?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => bail!("{} is not a FeatureCollection", path.display()),
    }
}

pub fn read_roads(path: &Path) -> Result<Roads> {
    roads_from_collection(&read_collection(path)?)
        .with_context(|| format!("bad road layer {}", path.display()))
}

pub fn read_buildings(path: &Path) -> Result<Buildings> {
    buildings_from_collection(&read_collection(path)?)
        .with_context(|| format!("bad building layer {}", path.display()))
}

/// Numeric feature id, else a numeric `fid` property, else the position
/// of the feature in its collection.
fn feature_id(feature: &Feature, position: usize) -> Result<Id> {
    match &feature.id {
        Some(FeatureId::Number(n)) => n
            .as_u64()
            .with_context(|| format!("feature id {n} is not a non-negative integer")),
        Some(FeatureId::String(s)) => s
            .parse::<Id>()
            .with_context(|| format!("feature id {s:?} is not an integer")),
        None => match feature.property("fid") {
            Some(fid) => fid
                .as_u64()
                .with_context(|| format!("fid {fid} is not a non-negative integer")),
            None => Ok(position as Id),
        },
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn coord(position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => bail!("position {position:?} has fewer than two ordinates"),
    }
}

fn line_string(positions: &[Vec<f64>]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// Roads must be linestrings, or multilinestrings with a single part;
/// multi-part roads are rejected. Too-short lines are passed through so the join reports them.
pub fn roads_from_collection(fc: &FeatureCollection) -> Result<Roads> {
    fc.features
        .iter()
        .enumerate()
        .map(|(position, feature)| -> Result<Road> {
            let id = feature_id(feature, position)?;
            let Some(geometry) = &feature.geometry else {
                bail!("road {id} has no geometry");
            };
            let geom = match &geometry.value {
                Value::LineString(positions) => line_string(positions)?,
                Value::MultiLineString(parts) if parts.len() == 1 => line_string(&parts[0])?,
                Value::MultiLineString(parts) => {
                    bail!("road {id} has {} parts, only single-part lines are supported", parts.len())
                }
                other => bail!("road {id} is a {}, expected a LineString", kind(other)),
            };
            Ok(Road::new(id, geom))
        })
        .collect()
}

/// Buildings must be points, or multipoints holding exactly one point.
pub fn buildings_from_collection(fc: &FeatureCollection) -> Result<Buildings> {
    fc.features
        .iter()
        .enumerate()
        .map(|(position, feature)| -> Result<Building> {
            let id = feature_id(feature, position)?;
            let point = match feature.geometry.as_ref().map(|g| &g.value) {
                Some(Value::Point(p)) => coord(p)?,
                Some(Value::MultiPoint(ps)) if ps.len() == 1 => coord(&ps[0])?,
                Some(other) => {
                    return Err(JoinError::MalformedBuilding { id })
                        .with_context(|| format!("building {id} is a {}", kind(other)))
                }
                None => return Err(JoinError::MalformedBuilding { id }.into()),
            };
            Ok(Building::new(id, Point(point)))
        })
        .collect()
}

fn connector_feature(c: Connector) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("BuildingID".to_string(), c.building_id.into());
    properties.insert("RoadID".to_string(), c.road_id.into());
    properties.insert("Length".to_string(), c.length().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(vec![
            vec![c.from.x(), c.from.y()],
            vec![c.to.x(), c.to.y()],
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn connectors_to_collection(connectors: &Connectors) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: connectors.iter().map(connector_feature).collect(),
        foreign_members: None,
    }
}

pub fn write_connectors(path: &Path, connectors: &Connectors) -> Result<()> {
    let json = serde_json::to_string_pretty(&connectors_to_collection(connectors))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
