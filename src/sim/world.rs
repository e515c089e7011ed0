//! World state: bodies, obstacles and gravity
//!
//! The world exclusively owns its collections. Bodies keep their insertion
//! order for the whole run; that order drives both the integration pass and
//! the pairwise collision pass.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacle::Obstacle;
use super::tick::GravityDirection;
use crate::config::SimConfig;
use crate::error::{ConfigError, SimError};

/// Drawable body state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Read-only copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub gravity: Vec2,
    pub bodies: Vec<BodyView>,
    pub obstacles: Vec<Obstacle>,
}

/// The simulated world
#[derive(Debug, Clone)]
pub struct World {
    pub(super) config: SimConfig,
    pub(super) bodies: Vec<Body>,
    pub(super) obstacles: Vec<Obstacle>,
    direction: GravityDirection,
    pub(super) gravity: Vec2,
    pub(super) tick_count: u64,
}

impl World {
    /// Build a world from config: place obstacles, then spawn bodies clear of them
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let obstacles = place_obstacles(&config, &mut rng);
        let bodies = spawn_bodies(&config, &obstacles, &mut rng)?;

        log::info!(
            "World {}x{} seed {}: {} bodies, {} obstacles",
            config.width,
            config.height,
            config.seed,
            bodies.len(),
            obstacles.len()
        );

        Ok(Self::assemble(config, bodies, obstacles))
    }

    /// Build a world from explicit bodies and obstacles
    ///
    /// Physics tunables still come from `config`; its body and obstacle
    /// layout fields are ignored.
    pub fn from_parts(
        config: SimConfig,
        bodies: Vec<Body>,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, SimError> {
        config.validate_physics()?;

        for (index, o) in obstacles.iter().enumerate() {
            if !(o.left < o.right && o.top < o.bottom) {
                return Err(ConfigError::DegenerateObstacle {
                    index,
                    width: o.width(),
                    height: o.height(),
                }
                .into());
            }
        }

        let bounds = config.bounds();
        for (index, body) in bodies.iter().enumerate() {
            if !(body.radius > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "radius",
                    requirement: "positive",
                    value: body.radius as f64,
                }
                .into());
            }
            if !(body.mass > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "mass",
                    requirement: "positive",
                    value: body.mass as f64,
                }
                .into());
            }
            if !body.is_contained(bounds) {
                return Err(ConfigError::BodyOutOfBounds {
                    index,
                    x: body.pos.x,
                    y: body.pos.y,
                }
                .into());
            }
            if let Some(obstacle) = obstacles
                .iter()
                .position(|o| o.overlaps_circle(body.pos, body.radius))
            {
                return Err(ConfigError::BodyOverlapsObstacle { index, obstacle }.into());
            }
        }

        Ok(Self::assemble(config, bodies, obstacles))
    }

    fn assemble(config: SimConfig, bodies: Vec<Body>, obstacles: Vec<Obstacle>) -> Self {
        let direction = GravityDirection::default();
        Self {
            gravity: direction.unit() * config.gravity_magnitude,
            config,
            bodies,
            obstacles,
            direction,
            tick_count: 0,
        }
    }

    /// Point gravity along `direction` at the configured magnitude
    pub fn set_gravity(&mut self, direction: GravityDirection) {
        if direction != self.direction {
            log::debug!("Gravity {:?} -> {:?}", self.direction, direction);
        }
        self.direction = direction;
        self.gravity = direction.unit() * self.config.gravity_magnitude;
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn gravity_direction(&self) -> GravityDirection {
        self.direction
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Bodies in iteration order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Ticks simulated so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total linear momentum
    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Total kinetic energy
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            gravity: self.gravity,
            bodies: self
                .bodies
                .iter()
                .map(|b| BodyView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Fixed layout from config, or `obstacle_count` randomly placed rectangles
fn place_obstacles(config: &SimConfig, rng: &mut Pcg32) -> Vec<Obstacle> {
    if let Some(specs) = &config.obstacles {
        return specs.iter().copied().map(Obstacle::from).collect();
    }

    let ((x_min, x_max), (y_min, y_max)) = config.obstacle_origin_ranges();
    (0..config.obstacle_count)
        .map(|_| {
            let x = rng.random_range(x_min..=x_max);
            let y = rng.random_range(y_min..=y_max);
            Obstacle::new(x, y, config.obstacle_width, config.obstacle_height)
        })
        .collect()
}

/// Rejection-sample spawn positions, bounded by `max_spawn_attempts` per body
fn spawn_bodies(
    config: &SimConfig,
    obstacles: &[Obstacle],
    rng: &mut Pcg32,
) -> Result<Vec<Body>, ConfigError> {
    let r = config.body_radius;
    let speed = config.initial_speed_range;
    let mut bodies = Vec::with_capacity(config.body_count);

    for index in 0..config.body_count {
        let pos = sample_free_position(config, obstacles, rng).ok_or_else(|| {
            log::warn!(
                "Body {} found no free spawn position in {} attempts",
                index,
                config.max_spawn_attempts
            );
            ConfigError::NoFreeSpawnPosition {
                index,
                attempts: config.max_spawn_attempts,
            }
        })?;

        let vel = Vec2::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        );
        bodies.push(Body::new(pos, vel, r, config.body_mass));
    }

    Ok(bodies)
}

fn sample_free_position(
    config: &SimConfig,
    obstacles: &[Obstacle],
    rng: &mut Pcg32,
) -> Option<Vec2> {
    let r = config.body_radius;

    for attempt in 1..=config.max_spawn_attempts {
        let pos = Vec2::new(
            rng.random_range(r..=config.width - r),
            rng.random_range(r..=config.height - r),
        );
        if !obstacles.iter().any(|o| o.overlaps_circle(pos, r)) {
            if attempt > 1 {
                log::debug!("Spawn accepted after {} attempts", attempt);
            }
            return Some(pos);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleSpec;

    fn small_config() -> SimConfig {
        SimConfig {
            body_count: 20,
            seed: 42,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_default_world() {
        let world = World::new(SimConfig::default()).unwrap();
        assert_eq!(world.bodies().len(), 100);
        assert_eq!(world.obstacles().len(), 3);
        assert_eq!(world.gravity(), Vec2::new(0.0, 1.0));
        assert_eq!(world.gravity_direction(), GravityDirection::Down);
        assert_eq!(world.tick_count(), 0);
    }

    #[test]
    fn test_spawn_respects_obstacles_and_bounds() {
        let world = World::new(small_config()).unwrap();
        let bounds = world.config().bounds();
        for body in world.bodies() {
            assert!(body.is_contained(bounds));
            for o in world.obstacles() {
                assert!(!o.overlaps_circle(body.pos, body.radius));
            }
            assert!(body.vel.x.abs() <= 2.0 && body.vel.y.abs() <= 2.0);
        }
    }

    #[test]
    fn test_random_obstacles_in_range() {
        let world = World::new(small_config()).unwrap();
        for o in world.obstacles() {
            assert!((100.0..=600.0).contains(&o.left));
            assert!((100.0..=400.0).contains(&o.top));
            assert_eq!(o.width(), 200.0);
            assert_eq!(o.height(), 20.0);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = World::new(small_config()).unwrap();
        let b = World::new(small_config()).unwrap();
        assert_eq!(a.bodies(), b.bodies());
        assert_eq!(a.obstacles(), b.obstacles());

        let c = World::new(SimConfig {
            seed: 43,
            ..small_config()
        })
        .unwrap();
        assert_ne!(a.bodies(), c.bodies());
    }

    #[test]
    fn test_fixed_obstacle_layout() {
        let config = SimConfig {
            obstacles: Some(vec![ObstacleSpec {
                x: 10.0,
                y: 20.0,
                width: 30.0,
                height: 40.0,
            }]),
            ..small_config()
        };
        let world = World::new(config).unwrap();
        assert_eq!(world.obstacles(), &[Obstacle::new(10.0, 20.0, 30.0, 40.0)]);
    }

    #[test]
    fn test_no_free_spawn_position_fails() {
        // One obstacle covering the whole world
        let config = SimConfig {
            obstacles: Some(vec![ObstacleSpec {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
            }]),
            max_spawn_attempts: 50,
            ..small_config()
        };
        let err = World::new(config).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::NoFreeSpawnPosition {
                index: 0,
                attempts: 50
            })
        ));
    }

    #[test]
    fn test_unsampleable_ranges_fail_cleanly() {
        let err = World::new(SimConfig {
            initial_speed_range: f32::MAX,
            body_count: 1,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::InvalidParameter {
                name: "initial_speed_range",
                ..
            })
        ));

        let err = World::new(SimConfig {
            width: f32::INFINITY,
            obstacle_count: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::InvalidParameter { name: "width", .. })
        ));
    }

    #[test]
    fn test_zero_bodies() {
        let world = World::new(SimConfig {
            body_count: 0,
            ..Default::default()
        })
        .unwrap();
        assert!(world.bodies().is_empty());
        assert_eq!(world.momentum(), Vec2::ZERO);
    }

    #[test]
    fn test_from_parts_validation() {
        let config = SimConfig::default();
        let platform = Obstacle::new(100.0, 200.0, 200.0, 20.0);

        let ok = World::from_parts(
            config.clone(),
            vec![Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, 10.0)],
            vec![platform],
        );
        assert!(ok.is_ok());

        let err = World::from_parts(
            config.clone(),
            vec![Body::new(Vec2::new(2.0, 50.0), Vec2::ZERO, 5.0, 10.0)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::BodyOutOfBounds { index: 0, .. })
        ));

        let err = World::from_parts(
            config.clone(),
            vec![
                Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, 10.0),
                Body::new(Vec2::new(150.0, 198.0), Vec2::ZERO, 5.0, 10.0),
            ],
            vec![platform],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::BodyOverlapsObstacle {
                index: 1,
                obstacle: 0
            })
        ));

        let err = World::from_parts(
            config.clone(),
            vec![Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, 0.0)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::InvalidParameter { name: "mass", .. })
        ));

        let flipped = Obstacle {
            left: 10.0,
            right: 5.0,
            top: 0.0,
            bottom: 10.0,
        };
        let err = World::from_parts(config, vec![], vec![flipped]).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration(ConfigError::DegenerateObstacle { index: 0, .. })
        ));
    }

    #[test]
    fn test_set_gravity_scales_by_magnitude() {
        let mut world = World::from_parts(
            SimConfig {
                gravity_magnitude: 0.5,
                ..Default::default()
            },
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(world.gravity(), Vec2::new(0.0, 0.5));
        world.set_gravity(GravityDirection::Left);
        assert_eq!(world.gravity(), Vec2::new(-0.5, 0.0));
        assert_eq!(world.gravity_direction(), GravityDirection::Left);
    }

    #[test]
    fn test_snapshot() {
        let world = World::new(small_config()).unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.bodies.len(), 20);
        assert_eq!(snap.obstacles.len(), 3);
        assert_eq!(snap.bodies[3].pos, world.bodies()[3].pos);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
