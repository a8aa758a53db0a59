//! Routing graph representation and builder.
//!
//! # Data layout
//!
//! Every road of the input network is subdivided into directed *mini-edges*,
//! one per consecutive node pair of its polyline.  Vertices and edges get
//! dense indices in a single pass and are never renumbered:
//!
//! ```text
//! vertices: [ intersections ... | way 0 mini-nodes | way 1 mini-nodes | ... ]
//! edges:    [ way 0 mini-edges  | way 1 mini-edges | ... ]
//! ```
//!
//! A road's edges are therefore contiguous: serial position `s` (1-based) of
//! road `r` is `EdgeId(first_edge(r) + s - 1)`.
//!
//! Edge attributes (`edge_from`, `edge_to`, `edge_length`, ...) are parallel
//! arrays indexed by `EdgeId`.  Outgoing adjacency is a `Vec<EdgeId>` per
//! vertex rather than CSR, because activating or deactivating a road edits
//! it in place.
//!
//! # Lookup tables
//!
//! | Table             | Maps                                          |
//! |-------------------|-----------------------------------------------|
//! | `edge_road`/`edge_serial` | edge → (road, 1-based serial)         |
//! | `location_index`  | (p1, p2, road) → edge                         |
//! | `endpoint_index`  | (from vertex, to vertex) → edge               |
//! | `edge_offset`     | edge → distance from the road start to the edge |
//!
//! `edge_offset` together with the road's first edge is the "leftmost" table
//! that turns any along-road distance into one subtraction.

use log::{error, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use mu_core::{DistanceFunction, EdgeId, Point, PointMatch, RoadId, RoadIdx, RoadNetwork, VertexId};

use crate::{RoutingConfig, RoutingError, RoutingResult};

// ── Location key ──────────────────────────────────────────────────────────────

/// Typed key of the location table: both endpoint coordinates plus the road.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct LocationKey {
    from: [u64; 2],
    to: [u64; 2],
    road: RoadIdx,
}

impl LocationKey {
    #[inline]
    fn new(from: Point, to: Point, road: RoadIdx) -> Self {
        Self { from: from.to_bits(), to: to.to_bits(), road }
    }
}

// ── Road bookkeeping ──────────────────────────────────────────────────────────

/// Per-road record.  Edges of a road occupy
/// `first_edge .. first_edge + edge_count`.
#[derive(Clone, Debug)]
pub(crate) struct RoadEntry {
    pub(crate) id: RoadId,
    pub(crate) first_edge: EdgeId,
    pub(crate) edge_count: u32,
    /// Vertices created for this road's interior polyline nodes.
    pub(crate) mini_vertices: Vec<VertexId>,
    /// Whether the road's edges are present in the adjacency lists.
    pub(crate) active: bool,
    /// New road built in partial mode; only these can be (de)activated.
    pub(crate) switchable: bool,
}

impl RoadEntry {
    #[inline]
    pub(crate) fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (self.first_edge.0..self.first_edge.0 + self.edge_count).map(EdgeId)
    }

    #[inline]
    pub(crate) fn last_edge(&self) -> EdgeId {
        EdgeId(self.first_edge.0 + self.edge_count - 1)
    }
}

// ── RoutingGraph ──────────────────────────────────────────────────────────────

/// Directed mini-edge graph with the lookup tables used by the one-to-many
/// search.
///
/// Edge arrays are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoutingGraphBuilder`].
pub struct RoutingGraph<D> {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Coordinates of each vertex.  Indexed by `VertexId`.
    pub vertex_point: Vec<Point>,

    /// Outgoing edges of each *active* road, per source vertex.
    pub(crate) out: Vec<Vec<EdgeId>>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<VertexId>,
    pub edge_to: Vec<VertexId>,
    /// Length under the graph's distance function.
    pub edge_length: Vec<f64>,
    /// Owning road of each edge.
    pub edge_road: Vec<RoadIdx>,
    /// 1-based position of the edge within its road.
    pub edge_serial: Vec<u32>,
    /// Distance from the start of the owning road to the start of the edge.
    pub edge_offset: Vec<f64>,

    // ── Roads and lookups ─────────────────────────────────────────────────
    pub(crate) roads: Vec<RoadEntry>,
    pub(crate) road_index: FxHashMap<RoadId, RoadIdx>,
    pub(crate) location_index: FxHashMap<LocationKey, EdgeId>,
    pub(crate) endpoint_index: FxHashMap<(VertexId, VertexId), EdgeId>,

    pub(crate) metric: D,
    pub(crate) config: RoutingConfig,
}

impl<D: DistanceFunction> RoutingGraph<D> {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_point.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing edges of `vertex` that belong to active roads.
    #[inline]
    pub fn out_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.out[vertex.index()]
    }

    /// Distance under the graph's metric.
    #[inline]
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        self.metric.distance(a, b)
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Replace the query configuration.  Rejected configs leave the current
    /// one in place.
    pub fn set_config(&mut self, config: RoutingConfig) -> RoutingResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Stable ID and serial position of the road owning `edge`.
    pub fn edge_road_id(&self, edge: EdgeId) -> (&RoadId, u32) {
        let road = self.edge_road[edge.index()];
        (&self.roads[road.index()].id, self.edge_serial[edge.index()])
    }

    /// The edge at 1-based `serial` of `road`.
    pub fn edge_at(&self, road: &str, serial: u32) -> Option<EdgeId> {
        let entry = &self.roads[self.road_index.get(road)?.index()];
        (1..=entry.edge_count)
            .contains(&serial)
            .then(|| EdgeId(entry.first_edge.0 + serial - 1))
    }

    /// The edge of `road` running from `p1` to `p2`.
    pub fn edge_at_location(&self, p1: Point, p2: Point, road: &str) -> Option<EdgeId> {
        let road = *self.road_index.get(road)?;
        self.location_index.get(&LocationKey::new(p1, p2, road)).copied()
    }

    /// The edge a point match was projected onto.
    #[inline]
    pub fn locate(&self, m: &PointMatch) -> Option<EdgeId> {
        self.edge_at_location(m.segment.p1, m.segment.p2, m.road_id.as_str())
    }

    /// The edge running from `from` to `to`, if any.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.endpoint_index.get(&(from, to)).copied()
    }

    /// First edge of the road owning `edge`, and the along-road distance from
    /// the start of that first edge to the start of `edge`.
    #[inline]
    pub fn leftmost(&self, edge: EdgeId) -> (EdgeId, f64) {
        let road = self.edge_road[edge.index()];
        (self.roads[road.index()].first_edge, self.edge_offset[edge.index()])
    }

    /// Along-road distance between the end of `upstream` and the start of
    /// `downstream`, two edges of the same road with `upstream` first.
    #[inline]
    pub fn distance_between(&self, upstream: EdgeId, downstream: EdgeId) -> f64 {
        self.edge_offset[downstream.index()]
            - self.edge_offset[upstream.index()]
            - self.edge_length[upstream.index()]
    }

    pub fn road_id(&self, road: RoadIdx) -> &RoadId {
        &self.roads[road.index()].id
    }

    /// Edges of `road` in serial order.
    pub fn road_edges(&self, road: &str) -> Option<impl Iterator<Item = EdgeId> + '_> {
        let entry = &self.roads[self.road_index.get(road)?.index()];
        Some(entry.edges())
    }

    /// `None` if `road` is not part of the graph.
    pub fn is_road_active(&self, road: &str) -> Option<bool> {
        self.road_index.get(road).map(|r| self.roads[r.index()].active)
    }

    /// Roads whose edges are currently held out of the adjacency lists.
    pub fn inactive_roads(&self) -> impl Iterator<Item = &RoadId> + '_ {
        self.roads.iter().filter(|r| !r.active).map(|r| &r.id)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Vertices with no outgoing edge, no incoming edge, and no membership in
    /// an inactive road.  Reflects the current activation state.
    pub fn isolated_vertices(&self) -> Vec<VertexId> {
        let n = self.vertex_count();
        let mut reached = vec![false; n];
        for edges in &self.out {
            for e in edges {
                reached[self.edge_to[e.index()].index()] = true;
            }
        }
        for road in self.roads.iter().filter(|r| !r.active) {
            for v in &road.mini_vertices {
                reached[v.index()] = true;
            }
        }
        (0..n)
            .filter(|&i| self.out[i].is_empty() && !reached[i])
            .map(|i| VertexId(i as u32))
            .collect()
    }
}

// ── RoutingGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`RoutingGraph`] from a [`RoadNetwork`].
///
/// # Example
///
/// ```
/// use mu_core::{Point, RoadNetwork, RoadNode, RoadWay};
/// use mu_routing::RoutingGraphBuilder;
///
/// let planar = |a: Point, b: Point| ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
///
/// let a = RoadNode::new("a", Point::new(0.0, 0.0));
/// let b = RoadNode::new("b", Point::new(20.0, 0.0));
/// let mid = RoadNode::new("m", Point::new(10.0, 0.0));
/// let mut net = RoadNetwork::new();
/// net.add_node(a.clone());
/// net.add_node(b.clone());
/// net.add_way(RoadWay::new("r", vec![a, mid, b], false).unwrap());
///
/// let graph = RoutingGraphBuilder::new(&net, planar).build().unwrap();
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub struct RoutingGraphBuilder<'a, D> {
    network: &'a RoadNetwork,
    metric:  D,
    partial: bool,
    config:  RoutingConfig,
}

impl<'a, D: DistanceFunction> RoutingGraphBuilder<'a, D> {
    pub fn new(network: &'a RoadNetwork, metric: D) -> Self {
        Self { network, metric, partial: false, config: RoutingConfig::default() }
    }

    /// In partial mode, ways flagged new start inactive and can later be
    /// switched on with [`RoutingGraph::activate_road`].
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub fn config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and produce a [`RoutingGraph`].
    ///
    /// Duplicate node IDs, duplicate locations and duplicate vertex pairs are
    /// logged and the first occurrence kept.  A way endpoint that is not an
    /// intersection and a repeated road ID are errors.
    pub fn build(self) -> RoutingResult<RoutingGraph<D>> {
        self.config.validate()?;
        let network = self.network;

        let mut vertex_point: Vec<Point> = Vec::with_capacity(network.nodes.len());
        let mut intersections: FxHashMap<&str, VertexId> = FxHashMap::default();
        let mut seen_nodes: FxHashSet<&str> = FxHashSet::default();

        for node in &network.nodes {
            if !seen_nodes.insert(node.id.as_str()) {
                error!("duplicate intersection node {}; keeping the first", node.id);
                continue;
            }
            intersections.insert(node.id.as_str(), VertexId(vertex_point.len() as u32));
            vertex_point.push(node.point);
        }

        let edge_estimate: usize = network.ways.iter().map(|w| w.segment_count()).sum();
        let mut edge_from   = Vec::with_capacity(edge_estimate);
        let mut edge_to     = Vec::with_capacity(edge_estimate);
        let mut edge_length = Vec::with_capacity(edge_estimate);
        let mut edge_road   = Vec::with_capacity(edge_estimate);
        let mut edge_serial = Vec::with_capacity(edge_estimate);
        let mut edge_offset = Vec::with_capacity(edge_estimate);

        let mut roads: Vec<RoadEntry> = Vec::with_capacity(network.ways.len());
        let mut road_index: FxHashMap<RoadId, RoadIdx> = FxHashMap::default();
        let mut location_index: FxHashMap<LocationKey, EdgeId> = FxHashMap::default();
        let mut endpoint_index: FxHashMap<(VertexId, VertexId), EdgeId> = FxHashMap::default();

        for way in &network.ways {
            let road = RoadIdx(roads.len() as u32);
            if road_index.insert(way.id().clone(), road).is_some() {
                return Err(RoutingError::DuplicateRoad(way.id().clone()));
            }

            let endpoint = |id: &str| {
                intersections.get(id).copied().ok_or_else(|| RoutingError::UnknownNode {
                    road: way.id().clone(),
                    node: id.into(),
                })
            };
            let head = endpoint(way.first().id.as_str())?;
            let tail = endpoint(way.last().id.as_str())?;

            // Vertex chain of this way: head, fresh mini-vertices, tail.
            let mut chain = Vec::with_capacity(way.nodes().len());
            let mut mini_vertices = Vec::with_capacity(way.mini_nodes().len());
            chain.push(head);
            for node in way.mini_nodes() {
                if !seen_nodes.insert(node.id.as_str()) {
                    error!("mini node {} of road {} reuses an existing node ID", node.id, way.id());
                }
                let v = VertexId(vertex_point.len() as u32);
                vertex_point.push(node.point);
                mini_vertices.push(v);
                chain.push(v);
            }
            chain.push(tail);

            let first_edge = EdgeId(edge_to.len() as u32);
            let mut offset = 0.0;
            for (i, pair) in way.nodes().windows(2).enumerate() {
                let e = EdgeId(edge_to.len() as u32);
                let (from, to) = (chain[i], chain[i + 1]);
                let length = self.metric.distance(pair[0].point, pair[1].point);

                let key = LocationKey::new(pair[0].point, pair[1].point, road);
                if *location_index.entry(key).or_insert(e) != e {
                    error!("road {} repeats the segment {} -> {}", way.id(), pair[0].point, pair[1].point);
                }
                if *endpoint_index.entry((from, to)).or_insert(e) != e {
                    error!("vertices {from} -> {to} already joined by another edge (road {})", way.id());
                }

                edge_from.push(from);
                edge_to.push(to);
                edge_length.push(length);
                edge_road.push(road);
                edge_serial.push(i as u32 + 1);
                edge_offset.push(offset);
                offset += length;
            }

            let switchable = self.partial && way.is_new();
            roads.push(RoadEntry {
                id: way.id().clone(),
                first_edge,
                edge_count: way.segment_count() as u32,
                mini_vertices,
                active: !switchable,
                switchable,
            });
        }

        let mut out = vec![Vec::new(); vertex_point.len()];
        for road in roads.iter().filter(|r| r.active) {
            for e in road.edges() {
                out[edge_from[e.index()].index()].push(e);
            }
        }

        let graph = RoutingGraph {
            vertex_point,
            out,
            edge_from,
            edge_to,
            edge_length,
            edge_road,
            edge_serial,
            edge_offset,
            roads,
            road_index,
            location_index,
            endpoint_index,
            metric: self.metric,
            config: self.config,
        };

        let isolated = graph.isolated_vertices();
        for v in &isolated {
            warn!("isolated vertex {v} at {}", graph.vertex_point[v.index()]);
        }
        info!(
            "routing graph built: {} vertices, {} edges, {} roads ({} inactive, {} isolated vertices)",
            graph.vertex_count(),
            graph.edge_count(),
            graph.road_count(),
            graph.inactive_roads().count(),
            isolated.len(),
        );
        Ok(graph)
    }
}
