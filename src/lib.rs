//! Bouncefield - bouncing balls under switchable gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, obstacles, collisions, world tick)
//! - `config`: Tunable simulation parameters, loadable from JSON
//! - `error`: Configuration and loading errors
//! - `pacing`: Fixed-step frame clock for drivers that run in real time
//! - `schedule`: Scripted gravity input for headless runs

pub mod config;
pub mod error;
pub mod pacing;
pub mod schedule;
pub mod sim;

pub use config::{ObstacleSpec, SimConfig};
pub use error::{ConfigError, ScheduleError, SimError};

/// Default tunables
pub mod consts {
    /// World bounds (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_COUNT: usize = 100;
    pub const BODY_RADIUS: f32 = 5.0;
    pub const BODY_MASS: f32 = 10.0;
    /// Initial velocity is uniform in [-range, range] per axis
    pub const INITIAL_SPEED_RANGE: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_COUNT: usize = 3;
    pub const OBSTACLE_WIDTH: f32 = 200.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    /// Obstacle origins are sampled in [margin, dim - 2 * margin]
    pub const OBSTACLE_MARGIN: f32 = 100.0;

    /// Gravity added to velocity each tick
    pub const GRAVITY_MAGNITUDE: f32 = 1.0;
    /// Velocity is divided by this on every reflection
    pub const BOUNCE_DAMPING: f32 = 1.2;
    /// Added to the contact distance before normalizing
    pub const COLLISION_EPSILON: f32 = 0.01;

    /// Driver pacing only; integration always uses a unit step per tick
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Rejection sampling bound for body spawn positions
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}
