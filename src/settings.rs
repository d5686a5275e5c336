//! Game settings and tuning
//!
//! Loaded from an optional JSON file; every field falls back to the
//! built-in defaults so partial files are fine.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Gameplay constants. Units are per frame unless the name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub friction: f32,
    pub coin_gravity: f32,
    pub particle_gravity: f32,
    pub player_speed: f32,
    pub jump_power: f32,
    pub start_lives: u32,
    /// Countdown budget in seconds
    pub time_budget: u32,
    pub damage_invincibility_ms: f64,
    pub star_invincibility_ms: f64,
    pub score_brick: u64,
    pub score_stomp: u64,
    pub score_coin: u64,
    pub score_power_up: u64,
    /// Points per remaining second on reaching the flag
    pub score_time_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            coin_gravity: COIN_GRAVITY,
            particle_gravity: PARTICLE_GRAVITY,
            player_speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            start_lives: START_LIVES,
            time_budget: TIME_BUDGET,
            damage_invincibility_ms: DAMAGE_INVINCIBILITY_MS,
            star_invincibility_ms: STAR_INVINCIBILITY_MS,
            score_brick: SCORE_BRICK,
            score_stomp: SCORE_STOMP,
            score_coin: SCORE_COIN,
            score_power_up: SCORE_POWER_UP,
            score_time_bonus: SCORE_TIME_BONUS,
        }
    }
}

/// Logical key names bound to each action (lower-case, as reported by the
/// browser's `KeyboardEvent.key`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for Controls {
    fn default() -> Self {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            left: keys(&["arrowleft", "a"]),
            right: keys(&["arrowright", "d"]),
            jump: keys(&[" ", "w", "arrowup"]),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (brick debris, stomp puffs)
    pub particles: bool,
    pub tuning: Tuning,
    pub controls: Controls,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            tuning: Tuning::default(),
            controls: Controls::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON and validate the tuning block
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} quality)",
            path.display(),
            settings.quality.as_str()
        );
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        let checks: [(&'static str, f64, bool); 5] = [
            ("tuning.gravity", t.gravity as f64, t.gravity > 0.0),
            (
                "tuning.friction",
                t.friction as f64,
                (0.0..1.0).contains(&t.friction),
            ),
            ("tuning.player_speed", t.player_speed as f64, t.player_speed > 0.0),
            ("tuning.jump_power", t.jump_power as f64, t.jump_power > 0.0),
            ("tuning.start_lives", t.start_lives as f64, t.start_lives > 0),
        ];
        for (field, value, ok) in checks {
            if !ok {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "High", "tuning": { "gravity": 0.5 } }"#)
            .expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.tuning.gravity, 0.5);
        assert_eq!(settings.tuning.jump_power, PLAYER_JUMP_POWER);
        assert_eq!(settings.controls, Controls::default());
    }

    #[test]
    fn test_invalid_friction_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "friction": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "tuning.friction",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ quality: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 100);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
        assert_eq!("MED".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!("High".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        let err = "ultra".parse::<QualityPreset>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref name) if name == "ultra"));
        assert!(err.to_string().contains("ultra"));
    }
}
