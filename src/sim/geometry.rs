//! 2D geometry helpers
//!
//! Field coordinates: origin top-left, x right, y down.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Vector from `a` to `b`
#[inline]
pub fn relative(a: DVec2, b: DVec2) -> DVec2 {
    b - a
}

/// Distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    relative(a, b).length()
}

/// Axis-aligned box test around a circle (center ± radius on both axes).
///
/// Cheaper than a circular hit test and deliberately looser near the corners.
#[inline]
pub fn box_contains(center: DVec2, radius: f64, point: DVec2) -> bool {
    point.x >= center.x - radius
        && point.x <= center.x + radius
        && point.y >= center.y - radius
        && point.y <= center.y + radius
}

/// The bounding rectangle of the simulation, (0,0) to (width,height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidField { width, height });
        }
        Ok(Self { width, height })
    }

    /// Smaller of the two dimensions
    #[inline]
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Clamp a coordinate so a circle of `radius` fits along an axis of length `extent`.
    ///
    /// A circle wider than the axis is pinned to `radius`.
    #[inline]
    pub fn fit_axis(value: f64, radius: f64, extent: f64) -> f64 {
        radius.max((extent - radius).min(value))
    }

    /// Whether a circle lies fully inside the field
    pub fn contains_circle(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius >= 0.0
            && center.x + radius <= self.width
            && center.y - radius >= 0.0
            && center.y + radius <= self.height
    }
}
