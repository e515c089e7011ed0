//! Scripted gravity input for headless runs
//!
//! A schedule is a comma-separated list of `direction:ticks` segments, e.g.
//! `down:120,left:60,none:30`. `none` holds no key, so gravity keeps its last
//! direction. Once the schedule runs out no key is held.

use crate::error::ScheduleError;
use crate::sim::{GravityDirection, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    direction: Option<GravityDirection>,
    ticks: u64,
}

/// Held keys over time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravitySchedule {
    segments: Vec<Segment>,
    /// Sum of segment lengths; checked at parse time so it never overflows
    total: u64,
}

impl GravitySchedule {
    pub fn parse(script: &str) -> Result<Self, ScheduleError> {
        let mut segments = Vec::new();
        let mut total: u64 = 0;

        for part in script.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, count) = part
                .split_once(':')
                .ok_or_else(|| ScheduleError::MissingTicks(part.to_string()))?;

            let direction = match name.trim() {
                n if n.eq_ignore_ascii_case("none") => None,
                n => Some(
                    GravityDirection::from_str(n)
                        .ok_or_else(|| ScheduleError::UnknownDirection(n.to_string()))?,
                ),
            };
            let ticks: u64 = count
                .trim()
                .parse()
                .map_err(|_| ScheduleError::BadTickCount(count.trim().to_string()))?;
            total = total
                .checked_add(ticks)
                .ok_or_else(|| ScheduleError::TooLong(script.to_string()))?;

            segments.push(Segment { direction, ticks });
        }

        Ok(Self { segments, total })
    }

    /// Total scripted ticks
    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Input for the given tick (0-based)
    pub fn input_at(&self, tick: u64) -> TickInput {
        // start + ticks never exceeds `total`
        let mut start = 0;
        for segment in &self.segments {
            if tick < start + segment.ticks {
                return segment
                    .direction
                    .map(TickInput::holding)
                    .unwrap_or_default();
            }
            start += segment.ticks;
        }
        TickInput::default()
    }
}
