//! Data-driven physics constants
//!
//! Defaults mirror `crate::consts`; a JSON document can override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LevelError, LevelResult};

/// Physics and playfield parameters for a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Horizontal distance per frame while a direction key is held
    pub move_speed: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Player top-left corner at level start
    pub spawn: Vec2,
    pub playfield_width: f32,
    /// Falling below this y is death
    pub playfield_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse overrides; keys not present keep their defaults.
    ///
    /// The merged result must pass [`Tuning::validate`].
    pub fn from_json(json: &str) -> LevelResult<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the step cannot run with: non-finite numbers, empty
    /// player or playfield, non-positive gravity, and a playfield narrower
    /// than the player (the horizontal clamp would have no valid range).
    pub fn validate(&self) -> LevelResult<()> {
        let fields = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("spawn.x", self.spawn.x),
            ("spawn.y", self.spawn.y),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LevelError::InvalidTuning(format!("{name} must be finite, got {value}")));
        }

        let positive = [
            ("gravity", self.gravity),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(LevelError::InvalidTuning(format!("{name} must be positive, got {value}")));
        }
        if self.move_speed < 0.0 {
            return Err(LevelError::InvalidTuning(format!(
                "move_speed must not be negative, got {}",
                self.move_speed
            )));
        }

        if self.playfield_width < self.player_width {
            return Err(LevelError::InvalidTuning(format!(
                "playfield_width {} is narrower than player_width {}",
                self.playfield_width, self.player_width
            )));
        }
        Ok(())
    }

    /// Apex height of a jump from standing, in scene units
    pub fn jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}
