//! `mu-core` — foundational types for the map-update routing toolkit.
//!
//! This crate is a dependency of every other `mu-*` crate.  It has no `mu-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VertexId`, `EdgeId`, `RoadIdx`, `NodeId`, `RoadId`   |
//! | [`geo`]         | `Point`, `Segment`, `DistanceFunction`                |
//! | [`network`]     | `RoadNode`, `RoadWay`, `RoadNetwork` (builder input)  |
//! | [`matching`]    | `PointMatch`                                          |
//! | [`error`]       | `MapError`, `MapResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod matching;
pub mod network;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MapError, MapResult};
pub use geo::{DistanceFunction, Point, Segment};
pub use ids::{EdgeId, NodeId, RoadId, RoadIdx, VertexId};
pub use matching::PointMatch;
pub use network::{RoadNetwork, RoadNode, RoadWay};
