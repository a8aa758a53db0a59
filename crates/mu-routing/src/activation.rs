//! Switching inferred roads in and out of the adjacency lists.
//!
//! Only roads built as new in partial mode are switchable.  Index assignment
//! never changes; activation only edits `out` and the road's `active` flag.
//!
//! # Precondition
//!
//! Calls must alternate per road.  Activating a road that is already active
//! appends its edges a second time; search results over such a graph are
//! unspecified.  This is not checked.
//!
//! Both operations take `&mut self`, so they cannot overlap with queries
//! borrowing the graph; quiesce any worker pool between inference rounds.

use log::debug;

use mu_core::{DistanceFunction, EdgeId, RoadIdx};

use crate::{RoutingError, RoutingGraph, RoutingResult};

impl<D: DistanceFunction> RoutingGraph<D> {
    /// Append the road's edges to the outgoing lists of their source vertices.
    pub fn activate_road(&mut self, road: &str) -> RoutingResult<()> {
        let r = self.switchable_road(road)?;
        let entry = &mut self.roads[r.index()];
        for e in entry.first_edge.0..entry.first_edge.0 + entry.edge_count {
            let from = self.edge_from[e as usize];
            self.out[from.index()].push(EdgeId(e));
        }
        entry.active = true;
        debug!("road {road} activated ({} edges)", entry.edge_count);
        Ok(())
    }

    /// Remove the road's edges from the outgoing lists of their source vertices.
    pub fn deactivate_road(&mut self, road: &str) -> RoutingResult<()> {
        let r = self.switchable_road(road)?;
        let entry = &mut self.roads[r.index()];
        for e in entry.first_edge.0..entry.first_edge.0 + entry.edge_count {
            let from = self.edge_from[e as usize];
            self.out[from.index()].retain(|x| x.0 != e);
        }
        entry.active = false;
        debug!("road {road} deactivated ({} edges)", entry.edge_count);
        Ok(())
    }

    fn switchable_road(&self, road: &str) -> RoutingResult<RoadIdx> {
        match self.road_index.get(road) {
            Some(&r) if self.roads[r.index()].switchable => Ok(r),
            _ => Err(RoutingError::UnknownRoad(road.into())),
        }
    }
}
