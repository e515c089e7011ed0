//! Axis-aligned rectangular obstacles
//!
//! Screen coordinates: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ObstacleSpec;

/// A static rectangle bodies bounce off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Obstacle {
    /// Build from a top-left origin and a size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Closest point of the rectangle to `p` (clamps each axis independently)
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.left, self.right), p.y.clamp(self.top, self.bottom))
    }

    /// True iff a circle strictly overlaps the rectangle
    ///
    /// Also true when the center lies inside the rectangle, since the nearest
    /// point is then the center itself.
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.distance_squared(self.nearest_point(center)) < radius * radius
    }

    /// Whether `x` lies within the horizontal extent (inclusive)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.left <= x && x <= self.right
    }

    /// Whether `y` lies within the vertical extent (inclusive)
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        self.top <= y && y <= self.bottom
    }
}

impl From<ObstacleSpec> for Obstacle {
    fn from(spec: ObstacleSpec) -> Self {
        Self::new(spec.x, spec.y, spec.width, spec.height)
    }
}
