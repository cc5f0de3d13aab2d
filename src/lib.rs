//! Swipe Snake - a grid snake arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, speed, session state)
//! - `driver`: Frame-throttled tick driver and shared single-writer handle
//! - `settings`: Data-driven rules and speed presets

pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::{SharedSession, TickDriver};
pub use settings::{Settings, SettingsError, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Playfield bounds (inclusive)
    pub const GRID_X_MIN: i32 = 0;
    pub const GRID_X_MAX: i32 = 37;
    pub const GRID_Y_MIN: i32 = 0;
    pub const GRID_Y_MAX: i32 = 70;

    /// Single-segment snake at session start
    pub const SNAKE_START: (i32, i32) = (5, 5);
    /// First food position (subsequent food is random)
    pub const FOOD_START: (i32, i32) = (5, 20);

    /// Head may "eat" food within this many cells on both axes
    pub const FOOD_TOLERANCE: i32 = 2;
    pub const SCORE_INCREMENT: u64 = 10;

    /// Tick interval at speed level 1 (ms)
    pub const INITIAL_MOVE_INTERVAL_MS: f64 = 150.0;
    /// Interval floor regardless of length (ms)
    pub const MIN_MOVE_INTERVAL_MS: f64 = 30.0;
    /// Per-level interval multiplier
    pub const SPEED_BASE: f64 = 0.85;
    pub const MAX_SPEED_LEVEL: u32 = 10;

    /// Largest |edge| accepted for the playfield
    pub const MAX_GRID_EXTENT: i32 = 1 << 20;

    /// Default food RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_5A4E;
    /// Headless runner frame cadence (Hz)
    pub const DEFAULT_FRAME_RATE: u32 = 60;
}
