//! Swipe Snake entry point
//!
//! Runs a headless session: frames are simulated at the configured rate and
//! fed through the tick driver, with the autopilot steering when enabled.
//! The final snapshot is printed as JSON.
//!
//! Usage: `swipe-snake [settings.json]`

use std::process::ExitCode;

use swipe_snake::sim::{StepOutcome, suggest_heading};
use swipe_snake::{Settings, TickDriver};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Swipe Snake (headless) starting...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::load(),
    };

    let mut state = settings.new_session();
    let mut driver = TickDriver::new();
    let frame_ms = settings.frame_ms();
    log::info!(
        "Preset {}, seed {:#x}, {} Hz, autopilot {}",
        settings.preset.as_str(),
        settings.seed,
        settings.frame_rate,
        if settings.autopilot { "on" } else { "off" }
    );

    let mut frames = 0u64;
    while frames < settings.max_frames && !state.is_over() {
        frames += 1;
        if settings.autopilot {
            let heading = suggest_heading(&state);
            state.request_direction(heading);
        }
        match driver.on_frame(&mut state, frames as f64 * frame_ms) {
            Some(StepOutcome::Ate) => log::info!(
                "Score {} (length {}, level {})",
                state.score,
                state.body.len(),
                state.speed_level
            ),
            Some(StepOutcome::GameOver) => log::info!("Game over after {frames} frames"),
            _ => {}
        }
    }

    if !state.is_over() {
        log::info!("Frame budget exhausted after {} steps", state.steps);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}
