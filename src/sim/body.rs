//! Circular bodies: integration plus obstacle and wall response

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// What a body hit during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Index of the obstacle that was responded to, if any
    pub obstacle: Option<usize>,
    /// Obstacle reflected the vertical component (top/bottom face)
    pub obstacle_vertical: bool,
    /// Obstacle reflected the horizontal component (left/right face)
    pub obstacle_horizontal: bool,
    /// Clamped against the left or right wall
    pub wall_x: bool,
    /// Clamped against the top or bottom wall
    pub wall_y: bool,
}

impl Contact {
    /// Number of wall reflections (0-2)
    pub fn wall_bounces(&self) -> u32 {
        self.wall_x as u32 + self.wall_y as u32
    }
}

/// Reflect one velocity component and lose energy
#[inline]
fn bounce(v: f32, damping: f32) -> f32 {
    -v / damping
}

/// A moving circular particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            mass,
        }
    }

    /// Linear momentum
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Whether the body lies inside `[radius, bounds - radius]` on both axes
    pub fn is_contained(&self, bounds: Vec2) -> bool {
        let r = self.radius;
        (r..=bounds.x - r).contains(&self.pos.x) && (r..=bounds.y - r).contains(&self.pos.y)
    }

    /// Advance one tick: gravity, first-match obstacle response, wall clamp
    ///
    /// Only the first obstacle (in slice order) overlapping the tentative
    /// position is responded to, even if several overlap. The face is chosen
    /// from the *current* position: a body horizontally within the obstacle
    /// hit a top/bottom face, one vertically within it hit a side face. A
    /// body within both (already inside) gets both reflections.
    ///
    /// Walls are checked after, and independently of, the obstacle response.
    pub fn advance(
        &mut self,
        gravity: Vec2,
        obstacles: &[Obstacle],
        bounds: Vec2,
        damping: f32,
    ) -> Contact {
        let mut contact = Contact::default();

        self.vel += gravity;
        let mut next = self.pos + self.vel;

        if let Some((index, obstacle)) = obstacles
            .iter()
            .enumerate()
            .find(|(_, o)| o.overlaps_circle(next, self.radius))
        {
            contact.obstacle = Some(index);

            if obstacle.spans_x(self.pos.x) {
                next.y = self.pos.y;
                self.vel.y = bounce(self.vel.y, damping);
                contact.obstacle_vertical = true;
            }

            if obstacle.spans_y(self.pos.y) {
                next.x = self.pos.x;
                self.vel.x = bounce(self.vel.x, damping);
                contact.obstacle_horizontal = true;
            }
        }

        let r = self.radius;

        if next.x - r < 0.0 {
            next.x = r;
            self.vel.x = bounce(self.vel.x, damping);
            contact.wall_x = true;
        } else if next.x + r > bounds.x {
            next.x = bounds.x - r;
            self.vel.x = bounce(self.vel.x, damping);
            contact.wall_x = true;
        }

        if next.y - r < 0.0 {
            next.y = r;
            self.vel.y = bounce(self.vel.y, damping);
            contact.wall_y = true;
        } else if next.y + r > bounds.y {
            next.y = bounds.y - r;
            self.vel.y = bounce(self.vel.y, damping);
            contact.wall_y = true;
        }

        self.pos = next;
        contact
    }
}
