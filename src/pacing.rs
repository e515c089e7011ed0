//! Fixed-step frame pacing for real-time drivers
//!
//! The simulation itself integrates with a unit step per tick; this clock
//! only decides how many ticks a frame of wall time is worth.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;

/// Longest frame we will try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Accumulates frame time and hands out whole ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_rate: u32,
    tick_dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            tick_dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Override the per-frame tick cap (at least 1)
    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    /// Wall time of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Feed `frame_dt` seconds of wall time; returns how many ticks to run
    ///
    /// Long frames are clamped and at most `max_substeps` ticks are handed
    /// out per call to prevent a spiral of death.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.tick_dt && ticks < self.max_substeps {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.tick_dt {
            log::debug!("Frame budget exhausted, dropping {:.3}s", self.accumulator);
            self.accumulator %= self.tick_dt;
        }
        ticks
    }
}
