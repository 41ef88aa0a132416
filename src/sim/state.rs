//! Level state and core simulation types
//!
//! One `LevelState` is one attempt at one level. Loading a level builds a
//! fresh one from the catalog; nothing carries over between attempts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::rect::Rect;
use super::tick::TickInput;
use crate::error::LevelResult;
use crate::levels::{LevelCatalog, LevelTemplate};
use crate::tuning::Tuning;

/// Result of a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing terminal happened
    Continue,
    /// Player touched a hazard or fell out of the playfield
    Died,
    /// Player reached a real goal
    Completed,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// The player-controlled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is down
    pub vel_y: f32,
    /// Standing on a platform this frame
    pub on_ground: bool,
}

impl Player {
    /// A player at the spawn point, at rest and airborne
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.spawn,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Apply gravity and vertical motion, and forget last frame's ground contact
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
        self.on_ground = false;
    }

    /// Rest the player's bottom edge on `top`
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.vel_y = 0.0;
        self.on_ground = true;
    }

    /// Stop upward motion against a surface whose bottom edge is `bottom`
    pub fn bump_into(&mut self, bottom: f32) {
        self.pos.y = bottom;
        self.vel_y = 0.0;
    }

    /// Horizontal movement and jumping from the held keys
    pub fn apply_input(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.left {
            self.pos.x -= tuning.move_speed;
        }
        if input.right {
            self.pos.x += tuning.move_speed;
        }
        self.pos.x = self.pos.x.clamp(0.0, tuning.playfield_width - self.size.x);

        if input.jump && self.on_ground {
            self.vel_y = tuning.jump_velocity;
            self.on_ground = false;
        }
    }
}

/// Everything that changes during one attempt at a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    /// 1-based level number
    pub level: u32,
    /// Live obstacles, in template order
    pub obstacles: Vec<Obstacle>,
    pub player: Player,
    /// Physics constants this attempt runs with
    pub tuning: Tuning,
    /// Frames simulated since the level was loaded
    pub ticks: u64,
}

impl LevelState {
    /// Load level `level` from the catalog with fresh trap state
    pub fn load(catalog: &LevelCatalog, level: u32, tuning: Tuning) -> LevelResult<Self> {
        let template = catalog.template(level)?;
        log::info!("Loading level {} ({} obstacles)", level, template.len());
        Ok(Self::from_template(level, template, tuning))
    }

    /// Build a level attempt directly from a template
    pub fn from_template(level: u32, template: &LevelTemplate, tuning: Tuning) -> Self {
        Self {
            level,
            obstacles: template.instantiate(),
            player: Player::spawn(&tuning),
            tuning,
            ticks: 0,
        }
    }
}
