use derive_more::Display;
use thiserror::Error;

use crate::Id;

/// The input set an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Layer {
    #[display("roads")]
    Roads,
    #[display("buildings")]
    Buildings,
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum JoinError {
    #[error("road {id} has {points} point(s), a polyline needs at least 2")]
    MalformedRoad { id: Id, points: usize },

    #[error("road {id} has a non-finite coordinate")]
    NonFiniteRoad { id: Id },

    #[error("building {id} has no usable point geometry")]
    MalformedBuilding { id: Id },

    #[error("identifier {id} occurs more than once in {layer}")]
    DuplicateId { layer: Layer, id: Id },

    #[error("cannot build an index over an empty road set")]
    EmptyInput,

    #[error("join cancelled after {processed} building(s)")]
    Cancelled { processed: usize },

    #[error("tie tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}
