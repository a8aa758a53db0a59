//! Road-network input model.
//!
//! This is the shape in which an external map loader hands a road network to
//! the routing-graph builder: intersection nodes with stable IDs, and ways
//! that list their full polyline (both endpoint intersections plus every
//! interior mini-node) in travel order.
//!
//! ```text
//!   I0 ──m1──m2──► I1        way "r1": [I0, m1, m2, I1]
//! ```
//!
//! Endpoints of a way must be intersections listed in [`RoadNetwork::nodes`];
//! interior nodes belong to the way alone.

use crate::{MapError, MapResult, NodeId, Point, RoadId};

/// A map node: an intersection when listed in [`RoadNetwork::nodes`], a
/// mini-node when it only appears inside a way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadNode {
    pub id: NodeId,
    pub point: Point,
}

impl RoadNode {
    pub fn new(id: impl Into<NodeId>, point: Point) -> Self {
        Self { id: id.into(), point }
    }
}

/// A directed road polyline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoadWay"))]
pub struct RoadWay {
    id: RoadId,
    nodes: Vec<RoadNode>,
    is_new: bool,
}

impl RoadWay {
    /// Create a way.  Fails with [`MapError::DegenerateWay`] if `nodes` holds
    /// fewer than two entries.
    ///
    /// `is_new` marks roads produced by map inference; in partial mode the
    /// routing graph keeps them inactive until explicitly activated.
    pub fn new(id: impl Into<RoadId>, nodes: Vec<RoadNode>, is_new: bool) -> MapResult<Self> {
        let id = id.into();
        if nodes.len() < 2 {
            return Err(MapError::DegenerateWay { road: id, nodes: nodes.len() });
        }
        Ok(Self { id, nodes, is_new })
    }

    pub fn id(&self) -> &RoadId {
        &self.id
    }

    pub fn nodes(&self) -> &[RoadNode] {
        &self.nodes
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn first(&self) -> &RoadNode {
        &self.nodes[0]
    }

    pub fn last(&self) -> &RoadNode {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Interior polyline nodes (everything but the two endpoints).
    pub fn mini_nodes(&self) -> &[RoadNode] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of mini-edges (`nodes - 1`).
    pub fn segment_count(&self) -> usize {
        self.nodes.len() - 1
    }
}

/// Unchecked wire form of [`RoadWay`]; deserialization goes through
/// [`RoadWay::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRoadWay {
    id: RoadId,
    nodes: Vec<RoadNode>,
    #[serde(default)]
    is_new: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoadWay> for RoadWay {
    type Error = MapError;

    fn try_from(raw: RawRoadWay) -> MapResult<Self> {
        RoadWay::new(raw.id, raw.nodes, raw.is_new)
    }
}

/// Intersection nodes plus the ways connecting them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadNetwork {
    pub nodes: Vec<RoadNode>,
    pub ways: Vec<RoadWay>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an intersection node.
    pub fn add_node(&mut self, node: RoadNode) {
        self.nodes.push(node);
    }

    pub fn add_way(&mut self, way: RoadWay) {
        self.ways.push(way);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }
}
