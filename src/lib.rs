//! Trapline - a trap-filled 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, level state)
//! - `levels`: Level catalog (immutable templates loaded from JSON)
//! - `session`: Level manager (reload on death, advance on completion)
//! - `render`: Read-only render view for an external renderer
//! - `progress`: Per-level completion flags
//! - `tuning`: Data-driven physics constants
//! - `bot`: Seeded autopilot input source
//! - `platform`: Browser bindings

pub mod bot;
pub mod error;
pub mod levels;
pub mod platform;
pub mod progress;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use bot::Autopilot;
pub use error::{LevelError, LevelResult};
pub use levels::{LevelCatalog, LevelTemplate};
pub use progress::{Progress, ProgressStore};
pub use render::{Frame, RenderItem};
pub use session::{Session, SessionEvent};
pub use sim::{LevelState, Obstacle, ObstacleKind, Outcome, Player, Rect, TickInput, step};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied every frame (units/frame²)
    pub const GRAVITY: f32 = 0.3;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Vertical velocity set on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -8.0;
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 300.0;

    /// Playfield dimensions (scene units / pixels)
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Number of levels the built-in catalog advertises
    pub const NUM_LEVELS: u32 = 10;
}
