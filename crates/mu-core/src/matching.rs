//! Map-matching result consumed by the routing engine.

use crate::{Point, RoadId, Segment};

/// A GPS point's projection onto one mini-edge of a road.
///
/// `segment` must reproduce the mini-edge's endpoint coordinates exactly:
/// the routing graph locates the edge by `(segment.p1, segment.p2, road_id)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointMatch {
    pub road_id: RoadId,
    pub segment: Segment,
    pub point: Point,
}

impl PointMatch {
    pub fn new(road_id: impl Into<RoadId>, segment: Segment, point: Point) -> Self {
        Self { road_id: road_id.into(), segment, point }
    }

    /// `true` if the projected point sits exactly on the segment's start node.
    #[inline]
    pub fn at_segment_start(&self) -> bool {
        self.point == self.segment.p1
    }

    /// `true` if the projected point sits exactly on the segment's end node.
    #[inline]
    pub fn at_segment_end(&self) -> bool {
        self.point == self.segment.p2
    }
}
