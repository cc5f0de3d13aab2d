//! Game settings and presets
//!
//! Stored as JSON. The path comes from the command line or the
//! `SWIPE_SNAKE_SETTINGS` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{InvalidRules, Rules, SessionState, SpeedCurve};

/// Environment variable naming the settings file
pub const SETTINGS_ENV_VAR: &str = "SWIPE_SNAKE_SETTINGS";

/// Speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Relaxed,
    #[default]
    Classic,
    Frantic,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Relaxed => "Relaxed",
            SpeedPreset::Classic => "Classic",
            SpeedPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "slow" => Some(SpeedPreset::Relaxed),
            "classic" | "normal" => Some(SpeedPreset::Classic),
            "frantic" | "fast" => Some(SpeedPreset::Frantic),
            _ => None,
        }
    }

    /// Interval at speed level 1 (ms)
    pub fn initial_interval_ms(&self) -> f64 {
        match self {
            SpeedPreset::Relaxed => 200.0,
            SpeedPreset::Classic => INITIAL_MOVE_INTERVAL_MS,
            SpeedPreset::Frantic => 110.0,
        }
    }

    /// Speed curve for this preset (floor, base and cap are shared)
    pub fn curve(&self) -> SpeedCurve {
        SpeedCurve {
            initial_interval_ms: self.initial_interval_ms(),
            ..SpeedCurve::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidRules(#[from] InvalidRules),
    #[error("frame rate must be positive")]
    ZeroFrameRate,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speed preset; always supplies `rules.speed`
    pub preset: SpeedPreset,
    pub rules: Rules,
    /// Food RNG seed
    pub seed: u64,

    // === Headless runner ===
    /// Simulated frames per second
    pub frame_rate: u32,
    /// Stop after this many frames even if the snake is alive
    pub max_frames: u64,
    /// Steer automatically
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: SpeedPreset::Classic,
            rules: Rules::default(),
            seed: DEFAULT_SEED,
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: 60 * 60 * 5,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Create settings from a speed preset
    pub fn from_preset(preset: SpeedPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.preset = preset;
        self.rules.speed = preset.curve();
    }

    /// Rules with the preset's speed curve applied
    pub fn effective_rules(&self) -> Rules {
        Rules {
            speed: self.preset.curve(),
            ..self.rules
        }
    }

    /// Fresh session for these settings
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.effective_rules(), self.seed)
    }

    /// Milliseconds between simulated frames
    pub fn frame_ms(&self) -> f64 {
        1000.0 / f64::from(self.frame_rate.max(1))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.effective_rules().validate()?;
        if self.frame_rate == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        let preset_curve = settings.preset.curve();
        // Omitted curves deserialize as the classic default
        if settings.rules.speed != preset_curve && settings.rules.speed != SpeedCurve::default() {
            log::warn!(
                "rules.speed is ignored; the {} preset supplies the speed curve",
                settings.preset.as_str()
            );
        }
        settings.rules.speed = preset_curve;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load from `SWIPE_SNAKE_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bounds;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("swipe_snake_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults_match_classic_rules() {
        let settings = Settings::default();
        assert_eq!(settings.preset, SpeedPreset::Classic);
        assert_eq!(settings.effective_rules(), Rules::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(SpeedPreset::from_str("FAST"), Some(SpeedPreset::Frantic));
        assert_eq!(SpeedPreset::from_str("relaxed"), Some(SpeedPreset::Relaxed));
        assert_eq!(SpeedPreset::from_str("ludicrous"), None);
        assert_eq!(SpeedPreset::Classic.as_str(), "Classic");
    }

    #[test]
    fn test_preset_changes_session_speed() {
        let session = Settings::from_preset(SpeedPreset::Relaxed).new_session();
        assert_eq!(session.tick_interval_ms, 200.0);
        assert_eq!(session.speed_level, 1);

        let session = Settings::from_preset(SpeedPreset::Frantic).new_session();
        assert_eq!(session.tick_interval_ms, 110.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "preset": "Frantic", "seed": 42 }"#)
            .expect("partial settings should parse");
        assert_eq!(settings.preset, SpeedPreset::Frantic);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.rules.bounds, Bounds::default());
        assert_eq!(settings.frame_rate, DEFAULT_FRAME_RATE);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "frame_rate": 0 }"#),
            Err(SettingsError::ZeroFrameRate)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "rules": { "food_tolerance": -3 } }"#),
            Err(SettingsError::InvalidRules(InvalidRules::NegativeTolerance(-3)))
        ));
    }

    #[test]
    fn test_extreme_bounds_rejected() {
        let json = r#"{"rules":{"bounds":{"x_min":-2147483648,"x_max":2147483647,"y_min":0,"y_max":70}}}"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::InvalidRules(InvalidRules::BoundsTooLarge(_)))
        ));
    }

    #[test]
    fn test_file_speed_curve_replaced_by_preset() {
        let json = r#"{ "preset": "Relaxed", "rules": { "speed": { "initial_interval_ms": 500.0, "min_interval_ms": 30.0, "base": 0.85, "max_level": 10 } } }"#;
        let settings = Settings::from_json(json).expect("custom curve still parses");
        assert_eq!(settings.rules.speed, SpeedPreset::Relaxed.curve());
        assert_eq!(settings.effective_rules().speed, settings.rules.speed);
        assert!(settings.to_json().expect("serialize").contains("200.0"));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::from_preset(SpeedPreset::Relaxed);
        settings.seed = 1234;
        settings.autopilot = false;

        settings.save_to(&path).expect("save settings");
        let loaded = Settings::load_from(&path).expect("load settings");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("missing");
        let err = Settings::load_from(&path).expect_err("file does not exist");
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().contains("swipe_snake_missing"));
    }
}
