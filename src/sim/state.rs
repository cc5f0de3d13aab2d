//! Session state and the control operations that mutate it
//!
//! Everything a renderer or a save needs lives in `SessionState`. It is
//! mutated only through `step()` (see `tick`) and the control methods here.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{Bounds, Coordinate, Heading};
use super::speed::SpeedCurve;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake advances on every driver tick
    Running,
    /// Frozen until resumed
    Paused,
    /// Head left the playfield; only `reset()` leaves this phase
    Over,
}

/// Cosmetic color theme, flipped each time food is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Food RNG position, serializable so a session can be reproduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Number of food spawns drawn so far
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next draw; each call yields an independent stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let mixed = self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.stream += 1;
        Pcg32::seed_from_u64(mixed)
    }
}

/// Rejected rule sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRules {
    #[error("bounds {0:?} contain no cells")]
    EmptyBounds(Bounds),
    #[error("bounds {0:?} reach beyond +/-{max}", max = MAX_GRID_EXTENT)]
    BoundsTooLarge(Bounds),
    #[error("snake start ({x}, {y}) is outside the bounds")]
    SnakeStartOutside { x: i32, y: i32 },
    #[error("food start ({x}, {y}) is outside the bounds")]
    FoodStartOutside { x: i32, y: i32 },
    #[error("food tolerance must be non-negative, got {0}")]
    NegativeTolerance(i32),
    #[error("speed curve is invalid: {0}")]
    SpeedCurve(&'static str),
}

/// Fixed rules of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub bounds: Bounds,
    pub snake_start: Coordinate,
    pub food_start: Coordinate,
    pub food_tolerance: i32,
    pub score_increment: u64,
    pub speed: SpeedCurve,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            snake_start: IVec2::new(SNAKE_START.0, SNAKE_START.1),
            food_start: IVec2::new(FOOD_START.0, FOOD_START.1),
            food_tolerance: FOOD_TOLERANCE,
            score_increment: SCORE_INCREMENT,
            speed: SpeedCurve::default(),
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), InvalidRules> {
        if self.bounds.is_empty() {
            return Err(InvalidRules::EmptyBounds(self.bounds));
        }
        if !self.bounds.within_extent() {
            return Err(InvalidRules::BoundsTooLarge(self.bounds));
        }
        if !self.bounds.contains(self.snake_start) {
            return Err(InvalidRules::SnakeStartOutside {
                x: self.snake_start.x,
                y: self.snake_start.y,
            });
        }
        if !self.bounds.contains(self.food_start) {
            return Err(InvalidRules::FoodStartOutside {
                x: self.food_start.x,
                y: self.food_start.y,
            });
        }
        if self.food_tolerance < 0 {
            return Err(InvalidRules::NegativeTolerance(self.food_tolerance));
        }
        let curve = &self.speed;
        if !(curve.min_interval_ms > 0.0) {
            return Err(InvalidRules::SpeedCurve("minimum interval must be positive"));
        }
        if !(curve.initial_interval_ms >= curve.min_interval_ms) {
            return Err(InvalidRules::SpeedCurve(
                "initial interval must not be below the minimum",
            ));
        }
        if !(curve.base > 0.0 && curve.base <= 1.0) {
            return Err(InvalidRules::SpeedCurve("base must be in (0, 1]"));
        }
        if curve.max_level == 0 {
            return Err(InvalidRules::SpeedCurve("max level must be at least 1"));
        }
        Ok(())
    }
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Head first
    pub body: Vec<Coordinate>,
    pub food: Coordinate,
    pub heading: Heading,
    pub score: u64,
    pub over: bool,
    pub paused: bool,
    pub speed_level: u32,
    pub dark_theme: bool,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub rules: Rules,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Snake segments, head first. Never empty.
    pub body: VecDeque<Coordinate>,
    pub food: Coordinate,
    pub heading: Heading,
    pub score: u64,
    pub phase: GamePhase,
    pub tick_interval_ms: f64,
    pub speed_level: u32,
    pub theme: Theme,
    /// Steps that moved the snake
    pub steps: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Rules::default(), DEFAULT_SEED)
    }
}

impl SessionState {
    /// Create a fresh session
    pub fn new(rules: Rules, seed: u64) -> Self {
        let speed = rules.speed.initial();
        Self {
            rules,
            seed,
            rng_state: RngState::new(seed),
            body: VecDeque::from([rules.snake_start]),
            food: rules.food_start,
            heading: Heading::Right,
            score: 0,
            phase: GamePhase::Running,
            tick_interval_ms: speed.interval_ms,
            speed_level: speed.level,
            theme: Theme::Light,
            steps: 0,
        }
    }

    /// Current head position
    pub fn head(&self) -> Coordinate {
        // body is never empty; fall back to the start cell rather than panic
        self.body.front().copied().unwrap_or(self.rules.snake_start)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Request a new heading.
    ///
    /// Reversing straight into the body is rejected. Accepted headings take
    /// effect on the next step. Returns whether the heading changed.
    pub fn request_direction(&mut self, heading: Heading) -> bool {
        if heading.is_opposite(self.heading) {
            log::trace!("Rejected reversal {:?} -> {:?}", self.heading, heading);
            return false;
        }
        self.heading = heading;
        true
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Paused at score {}", self.score);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::info!("Resumed");
        }
    }

    /// Pause button: flip between Running and Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Over => {}
        }
    }

    /// Discard the session and start over with the same rules and seed
    pub fn reset(&mut self) {
        *self = Self::new(self.rules, self.seed);
        log::info!("Session reset");
    }

    /// Place food at a random cell. Does not avoid the body.
    pub(crate) fn spawn_food(&mut self) {
        let mut rng = self.rng_state.next_rng();
        self.food = self.rules.bounds.random_cell(&mut rng);
    }

    /// Re-derive interval and level from the body length
    pub(crate) fn apply_speed(&mut self) {
        let speed = self.rules.speed.compute(self.body.len());
        if speed.level != self.speed_level {
            log::debug!(
                "Speed level {} -> {} ({:.1} ms)",
                self.speed_level,
                speed.level,
                speed.interval_ms
            );
        }
        self.tick_interval_ms = speed.interval_ms;
        self.speed_level = speed.level;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            body: self.body.iter().copied().collect(),
            food: self.food,
            heading: self.heading,
            score: self.score,
            over: self.is_over(),
            paused: self.is_paused(),
            speed_level: self.speed_level,
            dark_theme: self.theme.is_dark(),
        }
    }
}
