//! Bounded one-to-many shortest paths between point matches.
//!
//! # Algorithm
//!
//! 1. **Same-road shortcuts.**  Destinations on the source's road are
//!    resolved geometrically from the leftmost-offset table: forward
//!    movement is the exact along-road distance, and a short backward gap
//!    is accepted as GPS noise with a penalty (see [`RoutingConfig`]).
//! 2. **Bounded Dijkstra.**  The source's road is a simple chain, so the
//!    search starts at the road's terminal vertex with the remaining
//!    distance carried in `source_distance`.  Each outstanding destination
//!    is attached to the first vertex of *its* road together with the
//!    leftmost offset of its mini-edge; settling that vertex resolves it
//!    without searching along the road.
//!
//! Search state (distance map, parent edges, visited set, queue) is local to
//! each call, so any number of queries may run against a shared graph.
//!
//! [`RoutingConfig`]: crate::RoutingConfig

use log::{debug, error};
use rustc_hash::{FxHashMap, FxHashSet};

use mu_core::{DistanceFunction, EdgeId, PointMatch, RoadId, RoadIdx, VertexId};

use crate::queue::MinQueue;
use crate::{RoutingError, RoutingGraph, RoutingResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// Result for one destination: travelled distance and the roads crossed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Distance from the source point, `f64::INFINITY` if unreachable.
    pub distance: f64,
    /// Roads in travel order.  Empty when unreachable or when the move does
    /// not traverse any road.
    pub roads: Vec<RoadId>,
}

impl Route {
    pub fn unreachable() -> Self {
        Self { distance: f64::INFINITY, roads: Vec::new() }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    fn along(distance: f64, road: &RoadId) -> Self {
        Self { distance, roads: vec![road.clone()] }
    }
}

/// One independent request for [`RoutingGraph::shortest_paths_batch`].
#[derive(Clone, Debug)]
pub struct Query {
    pub source: PointMatch,
    pub destinations: Vec<PointMatch>,
    pub max_distance: f64,
}

/// A destination waiting for the first vertex of its road to be settled.
#[derive(Copy, Clone, Debug)]
struct Pending {
    /// Position in the caller's destination list.
    slot: usize,
    edge: EdgeId,
    /// Along-road distance from the road's first vertex to `edge`.
    shortcut: f64,
}

// ── Queries ───────────────────────────────────────────────────────────────────

impl<D: DistanceFunction> RoutingGraph<D> {
    /// Shortest distance and road sequence from `source` to every destination.
    ///
    /// The result has one [`Route`] per destination, in input order.
    /// Destinations farther than `max_distance` are unreachable, including
    /// ones whose road starts inside the cap but which lie beyond it.  The cap
    /// is inclusive.  A source or destination whose segment is not in the
    /// graph is logged and reported as unreachable; the only error is a
    /// corrupted parent chain.
    ///
    /// Destinations are resolved through the first vertex of their road
    /// without walking its edges, so a destination on an inactive road still
    /// gets a finite distance when that vertex is reachable.
    pub fn shortest_paths(
        &self,
        source: &PointMatch,
        destinations: &[PointMatch],
        max_distance: f64,
    ) -> RoutingResult<Vec<Route>> {
        let mut routes = vec![Route::unreachable(); destinations.len()];

        let Some(source_edge) = self.locate(source) else {
            error!(
                "source segment {} of road {} not found; {} destination(s) unreachable",
                source.segment,
                source.road_id,
                destinations.len(),
            );
            return Ok(routes);
        };
        let source_road = self.edge_road[source_edge.index()];

        let mut attached: FxHashMap<VertexId, Vec<Pending>> = FxHashMap::default();
        let mut outstanding = 0usize;

        for (slot, dest) in destinations.iter().enumerate() {
            let Some(dest_edge) = self.locate(dest) else {
                error!("destination segment {} of road {} not found", dest.segment, dest.road_id);
                continue;
            };
            if self.edge_road[dest_edge.index()] == source_road {
                if let Some(route) = self.same_road(source, source_edge, dest, dest_edge) {
                    if route.distance <= max_distance {
                        routes[slot] = route;
                    }
                    continue;
                }
            }
            let (first, shortcut) = self.leftmost(dest_edge);
            attached
                .entry(self.edge_from[first.index()])
                .or_default()
                .push(Pending { slot, edge: dest_edge, shortcut });
            outstanding += 1;
        }

        if outstanding == 0 {
            return Ok(routes);
        }

        let (root, source_distance) = self.road_exit(source, source_edge);
        let budget = max_distance - source_distance;

        let mut dist: FxHashMap<VertexId, f64> = FxHashMap::default();
        let mut parent: FxHashMap<VertexId, EdgeId> = FxHashMap::default();
        let mut visited: FxHashSet<VertexId> = FxHashSet::default();
        let mut queue: MinQueue<VertexId> = MinQueue::new();

        dist.insert(root, 0.0);
        let mut current = Some(root);

        while let Some(v) = current {
            let dv = dist.get(&v).copied().unwrap_or(f64::INFINITY);
            if dv > budget {
                debug!("search from {root} stopped at distance {dv} with {outstanding} destination(s) left");
                break;
            }
            visited.insert(v);

            for &e in self.out_edges(v) {
                let next = self.edge_to[e.index()];
                if visited.contains(&next) {
                    continue;
                }
                let tentative = dv + self.edge_length[e.index()];
                if queue.decrease_key(next, tentative) {
                    dist.insert(next, tentative);
                    parent.insert(next, e);
                }
            }

            if let Some(hits) = attached.remove(&v) {
                for hit in hits {
                    let dest = &destinations[hit.slot];
                    outstanding -= 1;
                    let distance = source_distance
                        + dv
                        + hit.shortcut
                        + self.distance(dest.segment.p1, dest.point);
                    if distance > max_distance {
                        continue;
                    }
                    let roads = self.assemble_path(v, root, &parent, source, source_edge, dest, hit.edge)?;
                    routes[hit.slot] = Route { distance, roads };
                }
                if outstanding == 0 {
                    break;
                }
            }

            current = queue.extract_min();
        }

        Ok(routes)
    }

    /// Run independent queries against this graph, one result per query in
    /// input order.  With the `parallel` feature the queries are spread over
    /// the rayon thread pool.
    pub fn shortest_paths_batch(&self, queries: &[Query]) -> Vec<RoutingResult<Vec<Route>>> {
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|q| self.shortest_paths(&q.source, &q.destinations, q.max_distance))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|q| self.shortest_paths(&q.source, &q.destinations, q.max_distance))
                .collect()
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Resolve a destination on the source's own road without searching.
    /// `None` means the destination needs the graph search.
    fn same_road(
        &self,
        source: &PointMatch,
        source_edge: EdgeId,
        dest: &PointMatch,
        dest_edge: EdgeId,
    ) -> Option<Route> {
        let road = self.road_id(self.edge_road[source_edge.index()]);
        let gap = self.distance(source.point, dest.point);
        if gap == 0.0 {
            return Some(Route { distance: 0.0, roads: Vec::new() });
        }
        let window = self.config.noise_window();

        if dest_edge == source_edge {
            let source_left = self.distance(source.point, source.segment.p2);
            let dest_left = self.distance(dest.point, dest.segment.p2);
            if source_left > dest_left {
                return Some(Route::along(gap, road));
            }
            if gap < window {
                return Some(Route::along(self.config.same_edge_noise_factor * gap, road));
            }
            return None;
        }

        if self.edge_serial[source_edge.index()] < self.edge_serial[dest_edge.index()] {
            let distance = self.distance(source.point, source.segment.p2)
                + self.distance_between(source_edge, dest_edge)
                + self.distance(dest.segment.p1, dest.point);
            let roads = if dest.at_segment_start() { Vec::new() } else { vec![road.clone()] };
            return Some(Route { distance, roads });
        }

        let back = self.distance(dest.point, dest.segment.p2)
            + self.distance_between(dest_edge, source_edge)
            + self.distance(source.segment.p1, source.point);
        (back < window).then(|| Route::along(self.config.adjacent_edge_noise_factor * back, road))
    }

    /// Follow the source's road to its terminal vertex, returning that vertex
    /// and the distance from the source point to it.
    fn road_exit(&self, source: &PointMatch, source_edge: EdgeId) -> (VertexId, f64) {
        let road = &self.roads[self.edge_road[source_edge.index()].index()];
        let mut vertex = self.edge_to[source_edge.index()];
        let mut travelled = self.distance(source.point, source.segment.p2);
        for e in source_edge.0 + 1..road.first_edge.0 + road.edge_count {
            travelled += self.edge_length[e as usize];
            vertex = self.edge_to[e as usize];
        }
        (vertex, travelled)
    }

    /// Road sequence from the source match to a destination attached at `reached`.
    #[allow(clippy::too_many_arguments)]
    fn assemble_path(
        &self,
        reached: VertexId,
        root: VertexId,
        parent: &FxHashMap<VertexId, EdgeId>,
        source: &PointMatch,
        source_edge: EdgeId,
        dest: &PointMatch,
        dest_edge: EdgeId,
    ) -> RoutingResult<Vec<RoadId>> {
        let source_road = self.edge_road[source_edge.index()];
        let dest_road = self.edge_road[dest_edge.index()];

        let mut roads: Vec<RoadIdx> = Vec::new();
        let leaves_at_road_end = source.at_segment_end()
            && source_edge == self.roads[source_road.index()].last_edge();
        if !leaves_at_road_end {
            roads.push(source_road);
        }
        for r in self.crossed_roads(reached, root, parent)? {
            if roads.last() != Some(&r) {
                roads.push(r);
            }
        }
        let arrives_at_road_start = dest.at_segment_start() && self.edge_serial[dest_edge.index()] == 1;
        if !arrives_at_road_start && roads.last() != Some(&dest_road) {
            roads.push(dest_road);
        }

        Ok(roads.into_iter().map(|r| self.road_id(r).clone()).collect())
    }

    /// Roads of the tree edges from `root` to `reached`, consecutive repeats
    /// collapsed.
    pub(crate) fn crossed_roads(
        &self,
        reached: VertexId,
        root: VertexId,
        parent: &FxHashMap<VertexId, EdgeId>,
    ) -> RoutingResult<Vec<RoadIdx>> {
        let mut roads: Vec<RoadIdx> = Vec::new();
        let mut v = reached;
        let mut steps = 0usize;
        while v != root {
            let e = *parent.get(&v).ok_or(RoutingError::BrokenPath { vertex: v })?;
            let r = self.edge_road[e.index()];
            if roads.last() != Some(&r) {
                roads.push(r);
            }
            v = self.edge_from[e.index()];
            steps += 1;
            if steps > self.vertex_count() {
                return Err(RoutingError::BrokenPath { vertex: v });
            }
        }
        roads.reverse();
        Ok(roads)
    }
}
