//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Unit timestep per tick
//! - Seeded RNG only (used at world construction)
//! - Stable iteration order (body index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod tick;
pub mod world;

pub use body::{Body, Contact};
pub use collision::resolve;
pub use obstacle::Obstacle;
pub use tick::{GravityDirection, TickInput, TickStats, tick};
pub use world::{BodyView, Snapshot, World};
