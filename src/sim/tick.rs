//! Per-frame simulation step
//!
//! Core game loop that advances a level attempt by exactly one frame.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, classify_contact, intersects};
use super::obstacle::Behavior;
use super::state::{LevelState, Outcome};

/// Held keys for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    pub fn left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Default::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

/// Advance the level attempt by one frame.
///
/// Order matters and is part of the contract:
/// 1. gravity and vertical motion, ground contact cleared
/// 2. each obstacle in template order updates, then is tested against the player
/// 3. after all obstacles, death (latched or fell out) ends the frame
/// 4. otherwise held keys are applied
///
/// Touching a real goal ends the frame immediately with `Completed`, skipping
/// every obstacle after it. Death latched earlier in the frame is discarded.
pub fn step(state: &mut LevelState, input: &TickInput) -> Outcome {
    state.ticks += 1;

    let tuning = state.tuning;
    let player = &mut state.player;

    let before = player.rect();
    player.integrate(tuning.gravity);

    let mut dead = false;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(player, tuning.playfield_height);

        let Some(hitbox) = obstacle.hitbox() else {
            continue;
        };

        match obstacle.behavior {
            Behavior::Goal { reversed: false, .. } => {
                if intersects(&player.rect(), &hitbox) {
                    log::info!("Level {} complete after {} ticks", state.level, state.ticks);
                    return Outcome::Completed;
                }
            }

            Behavior::Goal { reversed: true, .. }
            | Behavior::Danger { .. }
            | Behavior::FallingCeiling { triggered: true, .. } => {
                if intersects(&player.rect(), &hitbox) {
                    if !dead {
                        log::debug!("Player killed by {:?} at {:?}", obstacle.kind(), player.pos);
                    }
                    dead = true;
                }
            }

            Behavior::FallingCeiling { triggered: false, .. } => {}

            Behavior::Platform
            | Behavior::MovingPlatform { .. }
            | Behavior::CollapsingPlatform { .. }
            | Behavior::VanishingPlatform { .. } => {
                match classify_contact(&before, &player.rect(), player.vel_y, &hitbox) {
                    Some(Contact::Landing) => {
                        player.land_on(hitbox.top());
                        player.pos.x += obstacle.carry_dx();
                        obstacle.on_landed();
                    }
                    Some(Contact::CeilingBump) => {
                        player.bump_into(hitbox.bottom());
                        obstacle.on_bumped();
                    }
                    Some(Contact::Side) | None => {}
                }
            }
        }
    }

    if dead || player.pos.y > tuning.playfield_height {
        log::debug!("Player died on level {} at tick {}", state.level, state.ticks);
        return Outcome::Died;
    }

    player.apply_input(input, &tuning);
    Outcome::Continue
}
