//! Tunables for the same-road noise shortcuts.
//!
//! The multipliers and the tolerance window were tuned empirically on real
//! trajectories; treat the defaults as calibration, not derivation.

use crate::{RoutingError, RoutingResult};

/// Query-side configuration held by a [`RoutingGraph`](crate::RoutingGraph).
///
/// A destination that lies slightly *behind* the source on the same road is
/// usually GPS jitter of a slow or stopped vehicle.  If the backward gap is
/// shorter than [`noise_window`](Self::noise_window) it is accepted with a
/// penalty instead of forcing a detour around the block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Radius of the map-matching candidate search, in distance-function units.
    pub candidate_range: f64,

    /// Fraction of `candidate_range` tolerated as backward movement.
    pub backwards_factor: f64,

    /// Penalty applied to a backward gap inside one mini-edge.
    pub same_edge_noise_factor: f64,

    /// Penalty applied to a backward gap spanning mini-edges of one road.
    pub adjacent_edge_noise_factor: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            candidate_range: 50.0,
            backwards_factor: 0.2,
            same_edge_noise_factor: 1.1,
            adjacent_edge_noise_factor: 1.2,
        }
    }
}

impl RoutingConfig {
    /// Maximum backward gap accepted as noise: `candidate_range * backwards_factor`.
    #[inline]
    pub fn noise_window(&self) -> f64 {
        self.candidate_range * self.backwards_factor
    }

    /// Reject non-finite or negative ranges and penalties below 1.
    pub fn validate(&self) -> RoutingResult<()> {
        for (name, v) in [
            ("candidate_range", self.candidate_range),
            ("backwards_factor", self.backwards_factor),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(RoutingError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("same_edge_noise_factor", self.same_edge_noise_factor),
            ("adjacent_edge_noise_factor", self.adjacent_edge_noise_factor),
        ] {
            if !v.is_finite() || v < 1.0 {
                return Err(RoutingError::InvalidConfig(format!(
                    "{name} must be finite and at least 1, got {v}"
                )));
            }
        }
        Ok(())
    }
}
