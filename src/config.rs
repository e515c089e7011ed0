//! Simulation tunables
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SimError};

/// Fixed obstacle placement (top-left origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// All simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for obstacle placement and body spawning
    pub seed: u64,

    // === World ===
    pub width: f32,
    pub height: f32,

    // === Bodies ===
    pub body_count: usize,
    pub body_radius: f32,
    pub body_mass: f32,
    /// Initial velocity per axis is uniform in [-range, range]
    pub initial_speed_range: f32,
    /// Rejection sampling bound per body
    pub max_spawn_attempts: u32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_margin: f32,
    /// Fixed layout; replaces random placement when set
    pub obstacles: Option<Vec<ObstacleSpec>>,

    // === Physics ===
    pub gravity_magnitude: f32,
    pub damping: f32,
    pub collision_epsilon: f32,

    // === Driver ===
    pub tick_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,

            body_count: BODY_COUNT,
            body_radius: BODY_RADIUS,
            body_mass: BODY_MASS,
            initial_speed_range: INITIAL_SPEED_RANGE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_margin: OBSTACLE_MARGIN,
            obstacles: None,

            gravity_magnitude: GRAVITY_MAGNITUDE,
            damping: BOUNCE_DAMPING,
            collision_epsilon: COLLISION_EPSILON,

            tick_rate: TICK_RATE,
        }
    }
}

fn require(
    name: &'static str,
    requirement: &'static str,
    value: f64,
    ok: bool,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            requirement,
            value,
        })
    }
}

impl SimConfig {
    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// World size as a vector
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check every tunable that world construction depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_physics()?;
        self.validate_obstacle_layout()
    }

    /// Check world, body and physics tunables (everything but obstacle layout)
    pub fn validate_physics(&self) -> Result<(), ConfigError> {
        let f = |v: f32| v as f64;
        let positive = |v: f32| v > 0.0 && v.is_finite();
        let non_negative = |v: f32| v >= 0.0 && v.is_finite();

        // NaN fails every comparison below
        require(
            "width",
            "positive and finite",
            f(self.width),
            positive(self.width),
        )?;
        require(
            "height",
            "positive and finite",
            f(self.height),
            positive(self.height),
        )?;
        require(
            "body_radius",
            "positive and finite",
            f(self.body_radius),
            positive(self.body_radius),
        )?;
        require(
            "body_mass",
            "positive and finite",
            f(self.body_mass),
            positive(self.body_mass),
        )?;
        require(
            "body_radius",
            "small enough for the body to fit in the world",
            f(self.body_radius),
            2.0 * self.body_radius <= self.width.min(self.height),
        )?;
        // Velocities are sampled from [-range, range], whose span must stay finite
        require(
            "initial_speed_range",
            "non-negative with a finite span",
            f(self.initial_speed_range),
            non_negative(self.initial_speed_range)
                && (2.0 * self.initial_speed_range).is_finite(),
        )?;
        require(
            "max_spawn_attempts",
            "at least 1",
            self.max_spawn_attempts as f64,
            self.max_spawn_attempts >= 1,
        )?;
        require(
            "gravity_magnitude",
            "finite",
            f(self.gravity_magnitude),
            self.gravity_magnitude.is_finite(),
        )?;
        require(
            "damping",
            "positive and finite",
            f(self.damping),
            positive(self.damping),
        )?;
        require(
            "collision_epsilon",
            "non-negative and finite",
            f(self.collision_epsilon),
            non_negative(self.collision_epsilon),
        )?;
        require(
            "tick_rate",
            "positive",
            self.tick_rate as f64,
            self.tick_rate > 0,
        )?;
        Ok(())
    }

    fn validate_obstacle_layout(&self) -> Result<(), ConfigError> {
        let f = |v: f32| v as f64;

        match &self.obstacles {
            Some(specs) => {
                for (index, spec) in specs.iter().enumerate() {
                    let finite = [spec.x, spec.y, spec.width, spec.height]
                        .iter()
                        .all(|v| v.is_finite());
                    if !(finite && spec.width > 0.0 && spec.height > 0.0) {
                        return Err(ConfigError::DegenerateObstacle {
                            index,
                            width: spec.width,
                            height: spec.height,
                        });
                    }
                }
            }
            None if self.obstacle_count > 0 => {
                let finite = self.obstacle_width.is_finite() && self.obstacle_height.is_finite();
                if !(finite && self.obstacle_width > 0.0 && self.obstacle_height > 0.0) {
                    return Err(ConfigError::DegenerateObstacle {
                        index: 0,
                        width: self.obstacle_width,
                        height: self.obstacle_height,
                    });
                }
                require(
                    "obstacle_margin",
                    "non-negative and finite",
                    f(self.obstacle_margin),
                    self.obstacle_margin >= 0.0 && self.obstacle_margin.is_finite(),
                )?;
                let (x_range, y_range) = self.obstacle_origin_ranges();
                let fits = x_range.0 <= x_range.1
                    && y_range.0 <= y_range.1
                    && x_range.1 + self.obstacle_width <= self.width
                    && y_range.1 + self.obstacle_height <= self.height;
                if !fits {
                    return Err(ConfigError::ObstaclePlacement {
                        width: self.obstacle_width,
                        height: self.obstacle_height,
                        margin: self.obstacle_margin,
                        world_width: self.width,
                        world_height: self.height,
                    });
                }
            }
            None => {}
        }

        Ok(())
    }

    /// Inclusive ranges for random obstacle origins: ((x_min, x_max), (y_min, y_max))
    pub fn obstacle_origin_ranges(&self) -> ((f32, f32), (f32, f32)) {
        let m = self.obstacle_margin;
        ((m, self.width - 2.0 * m), (m, self.height - 2.0 * m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_obstacle_ranges() {
        // 800x600 world, margin 100: x in [100, 600], y in [100, 400]
        let config = SimConfig::default();
        let ((x0, x1), (y0, y1)) = config.obstacle_origin_ranges();
        assert_eq!((x0, x1), (100.0, 600.0));
        assert_eq!((y0, y1), (100.0, 400.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "body_count": 3, "seed": 7 }"#).unwrap();
        assert_eq!(config.body_count, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.damping, BOUNCE_DAMPING);
        assert_eq!(config.width, WORLD_WIDTH);
        assert!(config.obstacles.is_none());
    }

    #[test]
    fn test_fixed_obstacles_from_json() {
        let config = SimConfig::from_json(
            r#"{ "obstacles": [ { "x": 10, "y": 20, "width": 30, "height": 5 } ] }"#,
        )
        .unwrap();
        let specs = config.obstacles.unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].width, 30.0);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/nonexistent/bouncefield.json").unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }

    #[test]
    fn test_rejects_non_positive_radius_and_mass() {
        let config = SimConfig {
            body_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "body_radius",
                ..
            })
        ));

        let config = SimConfig {
            body_mass: -3.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "body_mass",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = SimConfig {
            damping: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "damping",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_obstacles_that_do_not_fit() {
        let config = SimConfig {
            width: 250.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ObstaclePlacement { .. })
        ));

        // No random obstacles requested, so the same world is fine
        let config = SimConfig {
            width: 250.0,
            obstacle_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_degenerate_fixed_obstacle() {
        let config = SimConfig {
            obstacles: Some(vec![
                ObstacleSpec {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                },
                ObstacleSpec {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 0.0,
                },
            ]),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DegenerateObstacle {
                index: 1,
                width: 10.0,
                height: 0.0,
            })
        );
    }

    fn rejected_name(config: &SimConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::InvalidParameter { name, .. }) => Some(name),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_non_finite_tunables() {
        let huge_speed = SimConfig {
            initial_speed_range: f32::MAX,
            body_count: 1,
            ..Default::default()
        };
        assert_eq!(rejected_name(&huge_speed), Some("initial_speed_range"));

        let infinite_world = SimConfig {
            width: f32::INFINITY,
            obstacle_count: 0,
            ..Default::default()
        };
        assert_eq!(rejected_name(&infinite_world), Some("width"));

        let infinite_mass = SimConfig {
            body_mass: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(rejected_name(&infinite_mass), Some("body_mass"));

        let infinite_epsilon = SimConfig {
            collision_epsilon: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(rejected_name(&infinite_epsilon), Some("collision_epsilon"));
    }

    #[test]
    fn test_huge_speed_range_from_json_is_rejected() {
        // 3e38 is a valid f32 but doubling it is not
        let config = SimConfig::from_json(r#"{ "initial_speed_range": 3e38 }"#).unwrap();
        assert_eq!(rejected_name(&config), Some("initial_speed_range"));

        let config = SimConfig::from_json(r#"{ "initial_speed_range": 1e38 }"#).unwrap();
        assert_eq!(config.validate(), Ok(()));
    }
}
