//! Adaptive speed: the snake ticks faster every two segments it grows

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tick interval and display level derived from the body length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub interval_ms: f64,
    pub level: u32,
}

/// Parameters of the speed-up curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedCurve {
    /// Interval at level 1 (ms)
    pub initial_interval_ms: f64,
    /// Interval floor (ms)
    pub min_interval_ms: f64,
    /// Multiplier applied once per level above 1
    pub base: f64,
    pub max_level: u32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            initial_interval_ms: INITIAL_MOVE_INTERVAL_MS,
            min_interval_ms: MIN_MOVE_INTERVAL_MS,
            base: SPEED_BASE,
            max_level: MAX_SPEED_LEVEL,
        }
    }
}

impl SpeedCurve {
    /// Speed for a body of `length` segments
    pub fn compute(&self, length: usize) -> Speed {
        let speed_ups = length.saturating_sub(1) / 2;
        let max_level = self.max_level.max(1);
        let level = u32::try_from(speed_ups)
            .unwrap_or(u32::MAX)
            .saturating_add(1)
            .min(max_level);
        let factor = self.base.powi((level - 1) as i32);
        let interval_ms = (self.initial_interval_ms * factor).max(self.min_interval_ms);
        Speed { interval_ms, level }
    }

    /// Speed of a freshly started session
    pub fn initial(&self) -> Speed {
        self.compute(1)
    }
}

/// Speed on the classic curve (150 ms, x0.85 per level, 30 ms floor, level 10 cap)
pub fn compute_speed(length: usize) -> Speed {
    SpeedCurve::default().compute(length)
}
