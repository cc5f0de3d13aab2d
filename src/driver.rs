//! Tick driver
//!
//! The host calls `on_frame` once per display refresh with a monotonic
//! timestamp in milliseconds. A step fires only when more than the current
//! tick interval has elapsed since the last step that fired, so the snake's
//! pace tracks `tick_interval_ms` rather than the frame rate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sim::{Heading, SessionSnapshot, SessionState, StepOutcome, step};

/// Elapsed-time throttle between frames and simulation steps
#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    /// Timestamp of the last frame that stepped (ms)
    last_step_ms: f64,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_step_ms(&self) -> f64 {
        self.last_step_ms
    }

    /// Handle one frame. Returns the step outcome if a step fired.
    ///
    /// Frames while paused or over neither step nor advance the throttle.
    pub fn on_frame(&mut self, state: &mut SessionState, now_ms: f64) -> Option<StepOutcome> {
        if !state.is_running() {
            return None;
        }
        if now_ms - self.last_step_ms > state.tick_interval_ms {
            self.last_step_ms = now_ms;
            Some(step(state))
        } else {
            None
        }
    }
}

/// Session shared between an input thread and a timing thread.
///
/// Every method holds the lock for the whole operation, so a step never
/// observes a half-applied direction change.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    // Operations commit fully or not at all; a poisoned lock still guards a
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn request_direction(&self, heading: Heading) -> bool {
        self.lock().request_direction(heading)
    }

    pub fn on_frame(&self, driver: &mut TickDriver, now_ms: f64) -> Option<StepOutcome> {
        driver.on_frame(&mut self.lock(), now_ms)
    }

    pub fn pause(&self) {
        self.lock().pause();
    }

    pub fn resume(&self) {
        self.lock().resume();
    }

    pub fn toggle_pause(&self) {
        self.lock().toggle_pause();
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the state
    pub fn with_state<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        f(&mut self.lock())
    }
}
