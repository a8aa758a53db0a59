//! Input-model error type.
//!
//! Downstream crates wrap `MapError` as one variant of their own error enum
//! (see `mu_routing::RoutingError::Map`).

use thiserror::Error;

use crate::RoadId;

/// Errors raised while assembling the road-network input model.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("road {road} has {nodes} node(s); a way needs at least two")]
    DegenerateWay { road: RoadId, nodes: usize },
}

/// Shorthand result type for `mu-core`.
pub type MapResult<T> = Result<T, MapError>;
