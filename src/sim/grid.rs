//! Grid geometry: coordinates, headings and the playfield rectangle
//!
//! The grid uses screen orientation: x grows to the right, y grows downward,
//! so `Up` decreases y.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A cell on the grid
pub type Coordinate = IVec2;

/// Direction the snake's head travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Unit displacement applied to the head on each step
    #[inline]
    pub fn delta(self) -> Coordinate {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    pub fn is_opposite(self, other: Heading) -> bool {
        self.opposite() == other
    }
}

/// Inclusive rectangle of legal head positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: GRID_X_MIN,
            x_max: GRID_X_MAX,
            y_min: GRID_Y_MIN,
            y_max: GRID_Y_MAX,
        }
    }
}

impl Bounds {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Number of columns (0 if the rectangle is empty)
    pub fn width(&self) -> i64 {
        (i64::from(self.x_max) - i64::from(self.x_min) + 1).max(0)
    }

    /// Number of rows (0 if the rectangle is empty)
    pub fn height(&self) -> i64 {
        (i64::from(self.y_max) - i64::from(self.y_min) + 1).max(0)
    }

    /// True if every edge lies within `MAX_GRID_EXTENT` of the origin
    pub fn within_extent(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|edge| edge.unsigned_abs() <= MAX_GRID_EXTENT.unsigned_abs())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.x_min..=self.x_max).contains(&c.x) && (self.y_min..=self.y_max).contains(&c.y)
    }

    /// Uniformly random cell inside the rectangle.
    ///
    /// Callers must not pass an empty rectangle (`Rules::validate` rejects them).
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        IVec2::new(
            rng.random_range(self.x_min..=self.x_max),
            rng.random_range(self.y_min..=self.y_max),
        )
    }
}

/// True iff `c` lies strictly outside the bounds on either axis
#[inline]
pub fn is_out_of_bounds(c: Coordinate, bounds: &Bounds) -> bool {
    !bounds.contains(c)
}
