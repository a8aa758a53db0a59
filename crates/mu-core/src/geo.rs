//! Planar/geographic coordinates and the pluggable distance metric.
//!
//! `Point` is stored as `f64` because matched points are compared for exact
//! equality with road nodes; `x` is the longitude and `y` the latitude when
//! the map is geographic.

/// A 2-D coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Bit patterns of both coordinates, with `-0.0` folded into `0.0`, for
    /// use in hashed lookup keys.
    #[inline]
    pub fn to_bits(self) -> [u64; 2] {
        [(self.x + 0.0).to_bits(), (self.y + 0.0).to_bits()]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed segment between two consecutive road nodes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.p1, self.p2)
    }
}

// ── DistanceFunction ──────────────────────────────────────────────────────────

/// Point-to-point metric used for edge lengths and partial-edge offsets.
///
/// Callers supply the implementation (great-circle for lon/lat maps,
/// Euclidean for projected ones).  All distances reported by the routing
/// engine are in this metric's units.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a built graph can serve queries
/// from several worker threads.
pub trait DistanceFunction: Send + Sync {
    fn distance(&self, a: Point, b: Point) -> f64;
}

impl<F> DistanceFunction for F
where
    F: Fn(Point, Point) -> f64 + Send + Sync,
{
    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        self(a, b)
    }
}
