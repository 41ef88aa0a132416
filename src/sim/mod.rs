//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `step` per frame, no wall-clock time
//! - Stable iteration order (level-template order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, classify_contact, intersects};
pub use obstacle::{Behavior, Obstacle, ObstacleKind, TriggerZone};
pub use rect::Rect;
pub use state::{LevelState, Outcome, Player};
pub use tick::{TickInput, step};
