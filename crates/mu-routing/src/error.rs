//! Routing-subsystem error type.
//!
//! Only conditions that make a graph unbuildable or a query result untrustworthy
//! are errors.  Missing source/destination locations are reported per
//! destination as an unreachable [`Route`](crate::Route) and logged instead.

use thiserror::Error;

use mu_core::{MapError, NodeId, RoadId, VertexId};

/// Errors produced by `mu-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("road {road} references node {node}, which is not an intersection of the network")]
    UnknownNode { road: RoadId, node: NodeId },

    #[error("road {0} appears more than once in the network")]
    DuplicateRoad(RoadId),

    #[error("road {0} is not registered for activation")]
    UnknownRoad(RoadId),

    #[error("parent chain broken at {vertex} while reconstructing a path")]
    BrokenPath { vertex: VertexId },

    #[error("invalid routing configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
