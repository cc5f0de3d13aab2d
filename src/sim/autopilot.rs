//! Demo-mode steering
//!
//! Greedy: close the larger gap to the food first. Never proposes a reversal
//! and avoids stepping off the grid while any other heading stays on it.

use super::grid::{Coordinate, Heading};
use super::state::SessionState;

/// Heading the autopilot would request for the current state
pub fn suggest_heading(state: &SessionState) -> Heading {
    let head = state.head();
    let bounds = &state.rules.bounds;
    let current = state.heading;

    let mut candidates = preferred_headings(head, state.food);
    // Fall back to whatever keeps us moving
    candidates.extend([current, turn_left(current), turn_right(current)]);

    let safe = |h: &Heading| !h.is_opposite(current) && bounds.contains(head + h.delta());

    candidates
        .iter()
        .copied()
        .find(safe)
        .unwrap_or(current)
}

/// Headings that shrink the distance to `target`, larger axis first
fn preferred_headings(from: Coordinate, target: Coordinate) -> Vec<Heading> {
    let gap = target - from;
    let horizontal = match gap.x {
        x if x > 0 => Some(Heading::Right),
        x if x < 0 => Some(Heading::Left),
        _ => None,
    };
    let vertical = match gap.y {
        y if y > 0 => Some(Heading::Down),
        y if y < 0 => Some(Heading::Up),
        _ => None,
    };

    if gap.x.abs() >= gap.y.abs() {
        [horizontal, vertical].into_iter().flatten().collect()
    } else {
        [vertical, horizontal].into_iter().flatten().collect()
    }
}

fn turn_left(h: Heading) -> Heading {
    match h {
        Heading::Up => Heading::Left,
        Heading::Left => Heading::Down,
        Heading::Down => Heading::Right,
        Heading::Right => Heading::Up,
    }
}

fn turn_right(h: Heading) -> Heading {
    turn_left(h).opposite()
}
