//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Steps are driven externally, one at a time
//! - Seeded RNG only
//! - No rendering, timing or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod speed;
pub mod state;
pub mod tick;

pub use autopilot::suggest_heading;
pub use collision::{is_game_over, is_near_food};
pub use grid::{Bounds, Coordinate, Heading, is_out_of_bounds};
pub use speed::{Speed, SpeedCurve, compute_speed};
pub use state::{GamePhase, InvalidRules, RngState, Rules, SessionSnapshot, SessionState, Theme};
pub use tick::{StepOutcome, step};
