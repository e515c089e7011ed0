//! Unit timestep simulation tick
//!
//! Core loop that advances the world deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve;
use super::world::World;

/// One of the four axis-aligned gravity directions (screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl GravityDirection {
    /// Unit vector; y grows downward
    pub fn unit(self) -> Vec2 {
        match self {
            GravityDirection::Up => Vec2::new(0.0, -1.0),
            GravityDirection::Down => Vec2::new(0.0, 1.0),
            GravityDirection::Left => Vec2::new(-1.0, 0.0),
            GravityDirection::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(GravityDirection::Up),
            "down" => Some(GravityDirection::Down),
            "left" => Some(GravityDirection::Left),
            "right" => Some(GravityDirection::Right),
            _ => None,
        }
    }
}

/// Directional keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Input holding exactly one key
    pub fn holding(direction: GravityDirection) -> Self {
        let mut input = Self::default();
        match direction {
            GravityDirection::Up => input.up = true,
            GravityDirection::Down => input.down = true,
            GravityDirection::Left => input.left = true,
            GravityDirection::Right => input.right = true,
        }
        input
    }

    /// First held key in priority order up, down, left, right
    pub fn gravity_direction(&self) -> Option<GravityDirection> {
        if self.up {
            Some(GravityDirection::Up)
        } else if self.down {
            Some(GravityDirection::Down)
        } else if self.left {
            Some(GravityDirection::Left)
        } else if self.right {
            Some(GravityDirection::Right)
        } else {
            None
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Bodies that responded to an obstacle
    pub obstacle_contacts: u32,
    /// Wall reflections (a body in a corner counts twice)
    pub boundary_bounces: u32,
    /// Body pairs that exchanged an impulse
    pub body_collisions: u32,
}

impl std::ops::AddAssign for TickStats {
    fn add_assign(&mut self, rhs: Self) {
        self.obstacle_contacts += rhs.obstacle_contacts;
        self.boundary_bounces += rhs.boundary_bounces;
        self.body_collisions += rhs.body_collisions;
    }
}

impl World {
    /// Advance the world by one tick
    ///
    /// `None` keeps the current gravity. Every body is integrated first, then
    /// every unordered pair `(i, j)` with `i < j` is resolved in ascending
    /// order. Pairs resolved later in the tick see velocities already changed
    /// by earlier pairs, so the outcome depends on body order.
    pub fn tick(&mut self, direction: Option<GravityDirection>) -> TickStats {
        if let Some(direction) = direction {
            self.set_gravity(direction);
        }

        let mut stats = TickStats::default();
        let gravity = self.gravity;
        let bounds = self.config.bounds();
        let damping = self.config.damping;
        let epsilon = self.config.collision_epsilon;
        let obstacles = &self.obstacles;

        for body in &mut self.bodies {
            let contact = body.advance(gravity, obstacles, bounds, damping);
            if contact.obstacle.is_some() {
                stats.obstacle_contacts += 1;
            }
            stats.boundary_bounces += contact.wall_bounces();
        }

        let n = self.bodies.len();
        for i in 0..n {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if resolve(a, b, epsilon) {
                    stats.body_collisions += 1;
                }
            }
        }

        self.tick_count += 1;
        log::trace!("Tick {}: {:?}", self.tick_count, stats);
        stats
    }
}

/// Advance the world by one tick using held directional keys
pub fn tick(world: &mut World, input: &TickInput) -> TickStats {
    world.tick(input.gravity_direction())
}
