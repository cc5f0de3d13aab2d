//! Single simulation step
//!
//! Advances the snake one cell. The wall test reads the head *before* it
//! moves, so a head drawn outside the bounds ends the session one step later.

use super::collision::{is_game_over, is_near_food};
use super::state::{GamePhase, SessionState};

/// What a call to `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused or over; nothing changed
    Skipped,
    /// Snake translated by one cell
    Moved,
    /// Snake grew and new food was placed
    Ate,
    /// Head was outside the bounds; session is now over
    GameOver,
}

/// Advance the session by one step
pub fn step(state: &mut SessionState) -> StepOutcome {
    if state.phase != GamePhase::Running {
        return StepOutcome::Skipped;
    }

    let head = state.head();
    let new_head = head + state.heading.delta();

    if is_game_over(head, &state.rules.bounds) {
        state.phase = GamePhase::Over;
        log::info!(
            "Game over at ({}, {}) with score {} (length {})",
            head.x,
            head.y,
            state.score,
            state.body.len()
        );
        return StepOutcome::GameOver;
    }

    state.steps += 1;
    let len_before = state.body.len();

    let outcome = if is_near_food(new_head, state.food, state.rules.food_tolerance) {
        state.spawn_food();
        state.body.push_front(new_head);
        state.score += state.rules.score_increment;
        state.theme = state.theme.toggled();
        log::debug!(
            "Ate food at step {}: score {}, next food ({}, {})",
            state.steps,
            state.score,
            state.food.x,
            state.food.y
        );
        StepOutcome::Ate
    } else {
        state.body.push_front(new_head);
        state.body.pop_back();
        StepOutcome::Moved
    };

    if state.body.len() != len_before {
        state.apply_speed();
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bounds, Heading, Rules, Theme};
    use glam::IVec2;
    use std::collections::VecDeque;

    #[test]
    fn test_fifteen_steps_right() {
        let mut state = SessionState::default();
        for _ in 0..15 {
            assert_eq!(step(&mut state), StepOutcome::Moved);
        }
        assert_eq!(state.head(), IVec2::new(20, 5));
        assert_eq!(state.body.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 15);
    }

    #[test]
    fn test_growth_on_food() {
        let mut state = SessionState::default();
        // Head (5,5) heading Down reaches y=18, within 2 of the food at (5,20)
        state.request_direction(Heading::Down);
        let mut ate_at = None;
        for i in 0..20 {
            let len_before = state.body.len();
            let score_before = state.score;
            match step(&mut state) {
                StepOutcome::Ate => {
                    assert_eq!(state.body.len(), len_before + 1);
                    assert_eq!(state.score, score_before + 10);
                    ate_at = Some(i);
                    break;
                }
                StepOutcome::Moved => {
                    assert_eq!(state.body.len(), len_before);
                    assert_eq!(state.score, score_before);
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(ate_at, Some(12));
        assert_eq!(state.head(), IVec2::new(5, 18));
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.rules.bounds.contains(state.food));
    }

    #[test]
    fn test_speed_follows_growth() {
        let mut state = SessionState::default();
        state.body = VecDeque::from([IVec2::new(10, 10), IVec2::new(9, 10)]);
        state.food = IVec2::new(11, 10);
        assert_eq!(step(&mut state), StepOutcome::Ate);
        assert_eq!(state.body.len(), 3);
        assert_eq!(state.speed_level, 2);
        assert!((state.tick_interval_ms - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_body_follows_head() {
        let mut state = SessionState::default();
        state.body = VecDeque::from([IVec2::new(10, 30), IVec2::new(9, 30), IVec2::new(8, 30)]);
        state.request_direction(Heading::Up);
        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert_eq!(
            state.body,
            VecDeque::from([IVec2::new(10, 29), IVec2::new(10, 30), IVec2::new(9, 30)])
        );
    }

    #[test]
    fn test_game_over_is_detected_one_step_late() {
        let rules = Rules {
            bounds: Bounds::new(0, 37, 0, 70),
            ..Rules::default()
        };
        let mut state = SessionState::new(rules, 1);
        state.body = VecDeque::from([IVec2::new(37, 5)]);
        state.heading = Heading::Right;

        // Head is still in bounds, so it moves out
        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(38, 5));
        assert!(state.is_running());

        let body_before = state.body.clone();
        assert_eq!(step(&mut state), StepOutcome::GameOver);
        assert!(state.is_over());
        assert_eq!(state.body, body_before);

        // Further steps do nothing
        assert_eq!(step(&mut state), StepOutcome::Skipped);
        assert_eq!(state.body, body_before);
    }

    #[test]
    fn test_paused_steps_change_nothing() {
        let mut state = SessionState::default();
        state.pause();
        let before = state.clone();
        for _ in 0..10 {
            assert_eq!(step(&mut state), StepOutcome::Skipped);
        }
        assert_eq!(state.body, before.body);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn test_food_can_land_on_body() {
        // A 1x1 playfield forces the new food onto the snake itself
        let rules = Rules {
            bounds: Bounds::new(0, 0, 0, 0),
            snake_start: IVec2::ZERO,
            food_start: IVec2::ZERO,
            ..Rules::default()
        };
        let mut state = SessionState::new(rules, 3);
        assert_eq!(step(&mut state), StepOutcome::Ate);
        assert_eq!(state.food, IVec2::ZERO);
        assert!(state.body.contains(&state.food));
    }

    #[test]
    fn test_no_self_collision() {
        let mut state = SessionState::default();
        state.body = VecDeque::from([
            IVec2::new(10, 40),
            IVec2::new(11, 40),
            IVec2::new(11, 41),
            IVec2::new(10, 41),
            IVec2::new(9, 41),
        ]);
        state.heading = Heading::Down;
        // Moves onto its own segment at (10, 41) and keeps running
        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert!(state.is_running());
        assert_eq!(state.head(), IVec2::new(10, 41));
    }

    #[test]
    fn test_reset_after_game_over() {
        let fresh = SessionState::default();
        let mut state = SessionState::default();
        state.request_direction(Heading::Up);
        while step(&mut state) != StepOutcome::GameOver {}
        assert!(state.is_over());

        state.reset();
        assert_eq!(state, fresh);
        assert_eq!(step(&mut state), StepOutcome::Moved);
    }

    #[test]
    fn test_determinism() {
        let mut a = SessionState::new(Rules::default(), 99_999);
        let mut b = SessionState::new(Rules::default(), 99_999);
        let turns = [Heading::Down, Heading::Right, Heading::Down, Heading::Left];
        for (i, heading) in turns.iter().cycle().take(40).enumerate() {
            if i % 5 == 0 {
                a.request_direction(*heading);
                b.request_direction(*heading);
            }
            assert_eq!(step(&mut a), step(&mut b));
        }
        assert_eq!(a, b);
    }
}
