//! Movement tuning
//!
//! All per-frame physics constants. Values are expressed per simulation
//! tick, so the game feel depends on how often ticks run (see `TickMode`).

use serde::{Deserialize, Serialize};

use crate::consts::PER_FRAME_TICK_RATE;
use crate::error::{ParkourError, Result};

/// How simulation ticks are scheduled relative to display frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickMode {
    /// One tick per animation frame. Speeds and jump arcs scale with the
    /// display refresh rate.
    #[default]
    PerFrame,
    /// Fixed logical tick rate decoupled from the display. Changes the
    /// numeric feel on displays that are not running at `hz`.
    Fixed { hz: f32 },
}

impl TickMode {
    /// Seconds per tick, if fixed
    pub fn step(&self) -> Option<f32> {
        match self {
            TickMode::PerFrame => None,
            TickMode::Fixed { hz } => Some(1.0 / hz),
        }
    }

    /// Ticks per second of play, assuming a ~60 Hz display in per-frame mode
    pub fn ticks_per_second(&self) -> f32 {
        match self {
            TickMode::PerFrame => PER_FRAME_TICK_RATE,
            TickMode::Fixed { hz } => *hz,
        }
    }
}

/// Player movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkourConfig {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal speed cap while a direction key is held
    pub player_speed: f32,
    /// Horizontal velocity change per tick while a direction key is held
    pub acceleration: f32,
    /// Horizontal velocity multiplier per tick with no direction held
    pub friction: f32,
    /// Upward velocity applied by a jump
    pub jump_force: f32,
    /// Horizontal kick away from the wall on a wall jump
    pub wall_jump_force: f32,
    /// Horizontal velocity set by a dash
    pub dash_force: f32,
    /// Ticks before another dash is allowed
    pub dash_cooldown_frames: u32,
    /// Vertical speed while sliding down a wall
    pub wall_slide_speed: f32,
    /// Afterimage positions kept
    pub trail_length: usize,
    /// Optional terminal velocity. Gravity accumulates without limit when unset.
    pub max_fall_speed: Option<f32>,
    /// Tick scheduling
    pub tick_mode: TickMode,
}

impl Default for ParkourConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            player_speed: 3.5,
            acceleration: 0.2,
            friction: 0.9,
            jump_force: 10.0,
            wall_jump_force: 6.0,
            dash_force: 12.0,
            dash_cooldown_frames: 30,
            wall_slide_speed: 1.5,
            trail_length: 5,
            max_fall_speed: None,
            tick_mode: TickMode::PerFrame,
        }
    }
}

impl ParkourConfig {
    /// Parse a (possibly partial) JSON tuning document. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded tuning: {:?}", config);
        Ok(config)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<()> {
        fn positive(field: &'static str, value: f32) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ParkourError::ConfigValue {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("gravity", self.gravity)?;
        positive("player_speed", self.player_speed)?;
        positive("acceleration", self.acceleration)?;
        positive("jump_force", self.jump_force)?;
        positive("wall_jump_force", self.wall_jump_force)?;
        positive("dash_force", self.dash_force)?;
        positive("wall_slide_speed", self.wall_slide_speed)?;

        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ParkourError::ConfigValue {
                field: "friction",
                reason: format!("must be in (0, 1), got {}", self.friction),
            });
        }
        if self.trail_length == 0 {
            return Err(ParkourError::ConfigValue {
                field: "trail_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(cap) = self.max_fall_speed {
            positive("max_fall_speed", cap)?;
        }
        if let TickMode::Fixed { hz } = self.tick_mode {
            positive("tick_mode.hz", hz)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ParkourConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_mode, TickMode::PerFrame);
        assert!(config.max_fall_speed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ParkourConfig::from_json(r#"{ "gravity": 0.5, "trail_length": 10 }"#).unwrap();
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.trail_length, 10);
        assert_eq!(config.jump_force, 10.0);
        assert_eq!(config.dash_cooldown_frames, 30);
    }

    #[test]
    fn test_fixed_tick_mode_from_json() {
        let config =
            ParkourConfig::from_json(r#"{ "tick_mode": { "mode": "fixed", "hz": 120.0 } }"#)
                .unwrap();
        assert_eq!(config.tick_mode, TickMode::Fixed { hz: 120.0 });
        assert!((config.tick_mode.step().unwrap() - 1.0 / 120.0).abs() < 1e-6);
        assert_eq!(config.tick_mode.ticks_per_second(), 120.0);
        assert_eq!(TickMode::PerFrame.ticks_per_second(), 60.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ParkourConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ParkourError::ConfigParse(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = ParkourConfig::from_json(r#"{ "friction": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ParkourError::ConfigValue { field: "friction", .. }));

        let err = ParkourConfig::from_json(r#"{ "trail_length": 0 }"#).unwrap_err();
        assert!(matches!(err, ParkourError::ConfigValue { field: "trail_length", .. }));

        let err = ParkourConfig::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ParkourError::ConfigValue { field: "gravity", .. }));
    }
}
