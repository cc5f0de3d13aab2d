//! Collision predicates for the grid
//!
//! Food pickup is forgiving: the head only has to come within a small
//! Chebyshev distance of the food cell. Only the head is tested against the
//! walls; the body never collides with itself.

use super::grid::{Bounds, Coordinate, is_out_of_bounds};

/// True iff `a` is within `tolerance` cells of `food` on both axes
#[inline]
pub fn is_near_food(a: Coordinate, food: Coordinate, tolerance: i32) -> bool {
    (a.x - food.x).abs() <= tolerance && (a.y - food.y).abs() <= tolerance
}

/// True iff the head has left the playfield
#[inline]
pub fn is_game_over(head: Coordinate, bounds: &Bounds) -> bool {
    is_out_of_bounds(head, bounds)
}
