//! Nearest-road join: one connector per building, from the building to
//! the closest point of the road nearest to it.

mod conf;
pub use conf::*;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::{default, Building, Buildings, Connector, Connectors, JoinError, LinearScan, NearestNeighbor, RoadIndex, Roads};

/// Builds the R-tree index over `roads`.
pub fn build_index(roads: &Roads) -> Result<RoadIndex, JoinError> {
    RoadIndex::build(roads)
}

/// Connects every building to its nearest road with the default
/// configuration. An empty road set yields no connectors.
pub fn join(roads: &Roads, buildings: &Buildings) -> Result<Connectors, JoinError> {
    join_with(roads, buildings, &default())
}

pub fn join_with(
    roads: &Roads,
    buildings: &Buildings,
    conf: &JoinConf,
) -> Result<Connectors, JoinError> {
    run(roads, buildings, conf, None)
}

/// Like [`join_with`], giving up with [`JoinError::Cancelled`] once
/// `cancel` is raised. The flag is read between buildings.
pub fn join_cancellable(
    roads: &Roads,
    buildings: &Buildings,
    conf: &JoinConf,
    cancel: &AtomicBool,
) -> Result<Connectors, JoinError> {
    run(roads, buildings, conf, Some(cancel))
}

fn run(
    roads: &Roads,
    buildings: &Buildings,
    conf: &JoinConf,
    cancel: Option<&AtomicBool>,
) -> Result<Connectors, JoinError> {
    conf.validate()?;
    match conf.strategy {
        IndexStrategy::RTree => {
            let index = RoadIndex::build(roads)?.with_tie_tolerance(conf.tie_tolerance);
            join_index(&index, buildings, conf, cancel)
        }
        IndexStrategy::LinearScan => {
            let index = LinearScan::build(roads)?.with_tie_tolerance(conf.tie_tolerance);
            join_index(&index, buildings, conf, cancel)
        }
    }
}

/// Joins `buildings` against an already built index.
///
/// Connectors come out in ascending building id. Buildings with no
/// nearest road (empty index) are skipped. The tie tolerance of `conf`
/// is not applied here, it belongs to the index.
pub fn join_index<I>(
    index: &I,
    buildings: &Buildings,
    conf: &JoinConf,
    cancel: Option<&AtomicBool>,
) -> Result<Connectors, JoinError>
where
    I: NearestNeighbor + Sync,
{
    buildings.validate()?;

    let mut order: Vec<usize> = (0..buildings.len()).collect();
    // ids are unique after validation
    order.sort_unstable_by_key(|&row| buildings.id[row]);

    let processed = AtomicUsize::new(0);
    let connect = |&row: &usize| -> Result<Option<Connector>, JoinError> {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(JoinError::Cancelled {
                processed: processed.load(Ordering::Relaxed),
            });
        }
        let connector = buildings
            .row(row)
            .and_then(|building| connect_building(index, building));
        processed.fetch_add(1, Ordering::Relaxed);
        Ok(connector)
    };

    let matched: Vec<Option<Connector>> = if conf.parallel {
        order.par_iter().map(connect).collect::<Result<_, _>>()?
    } else {
        order.iter().map(connect).collect::<Result<_, _>>()?
    };

    let connectors: Connectors = matched.into_iter().flatten().collect();
    debug!(
        buildings = buildings.len(),
        connectors = connectors.len(),
        skipped = buildings.len() - connectors.len(),
        parallel = conf.parallel,
        "nearest road join finished"
    );
    Ok(connectors)
}

fn connect_building<I: NearestNeighbor>(index: &I, building: Building) -> Option<Connector> {
    let (road_id, to) = index.nearest_neighbor_road(&building.geom)?;
    Some(Connector {
        building_id: building.id,
        road_id,
        from: building.geom,
        to,
    })
}
