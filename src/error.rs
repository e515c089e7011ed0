//! Error types for world construction and config loading

use std::path::PathBuf;

use thiserror::Error;

/// A configuration that cannot produce a valid world
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A numeric tunable is outside its valid range
    #[error("{name} must be {requirement}, got {value}")]
    InvalidParameter {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// Obstacle with zero or negative extent
    #[error("obstacle {index} has degenerate size {width}x{height}")]
    DegenerateObstacle {
        index: usize,
        width: f32,
        height: f32,
    },

    /// Random obstacle placement range is empty
    #[error("obstacles of {width}x{height} with margin {margin} do not fit in a {world_width}x{world_height} world")]
    ObstaclePlacement {
        width: f32,
        height: f32,
        margin: f32,
        world_width: f32,
        world_height: f32,
    },

    /// Explicit body outside the world bounds
    #[error("body {index} at ({x}, {y}) lies outside the world bounds")]
    BodyOutOfBounds { index: usize, x: f32, y: f32 },

    /// Explicit body placed on top of an obstacle
    #[error("body {index} overlaps obstacle {obstacle}")]
    BodyOverlapsObstacle { index: usize, obstacle: usize },

    /// Rejection sampling ran out of attempts
    #[error("no free spawn position for body {index} after {attempts} attempts")]
    NoFreeSpawnPosition { index: usize, attempts: u32 },
}

/// A malformed gravity schedule script
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("segment '{0}' is missing ':<ticks>'")]
    MissingTicks(String),

    #[error("unknown gravity direction '{0}' (expected up, down, left, right or none)")]
    UnknownDirection(String),

    #[error("invalid tick count '{0}'")]
    BadTickCount(String),

    #[error("schedule '{0}' is longer than u64::MAX ticks")]
    TooLong(String),
}

/// Top-level library error
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
