//! Map-subsystem error type.

use thiserror::Error;

use cab_core::Coord;

/// Errors produced while building or merging a [`KnowledgeMap`][crate::KnowledgeMap].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("no such node {0} in this taxi's service area")]
    UnknownNode(Coord),

    #[error("node {node} expects neighbour {neighbour} which is not in this taxi's service area")]
    UnknownNeighbour { node: Coord, neighbour: Coord },
}

pub type MapResult<T> = Result<T, MapError>;
