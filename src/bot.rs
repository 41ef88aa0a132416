//! Autopilot input source
//!
//! A naive runner for demo/idle play: holds right and jumps when it sees a
//! hazard or a gap ahead. It only looks at what a player could see, so hidden
//! traps still catch it. Seeded jitter keeps runs varied but reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Behavior, LevelState, Rect, TickInput, intersects};

/// Chance per tick of pausing to "hesitate"
const HESITATE_CHANCE: f64 = 0.01;
/// How long a hesitation lasts, in ticks
const HESITATE_TICKS: u32 = 12;

/// Seeded scripted player
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Distance ahead of the player that is scanned this tick
    lookahead: f32,
    hesitate_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            lookahead: 24.0,
            hesitate_ticks: 0,
        }
    }

    /// Sample the held keys for the next step
    pub fn next_input(&mut self, state: &LevelState) -> TickInput {
        self.lookahead = self.rng.random_range(12.0..40.0);

        if self.hesitate_ticks > 0 {
            self.hesitate_ticks -= 1;
            return TickInput::default();
        }
        if state.player.on_ground && self.rng.random_bool(HESITATE_CHANCE) {
            self.hesitate_ticks = HESITATE_TICKS;
            return TickInput::default();
        }

        let jump = state.player.on_ground && (self.hazard_ahead(state) || self.gap_ahead(state));
        TickInput::right().with_jump(jump)
    }

    /// Player rectangle shifted forward by the lookahead
    fn lookahead_rect(&self, state: &LevelState) -> Rect {
        let mut ahead = state.player.rect();
        ahead.x += self.lookahead;
        ahead
    }

    fn hazard_ahead(&self, state: &LevelState) -> bool {
        let ahead = self.lookahead_rect(state);
        state.obstacles.iter().filter(|o| o.is_visible()).any(|o| {
            let deadly = matches!(
                o.behavior,
                Behavior::Danger { .. }
                    | Behavior::Goal { reversed: true, .. }
                    | Behavior::FallingCeiling { triggered: true, .. }
            );
            deadly && o.hitbox().is_some_and(|hitbox| intersects(&ahead, &hitbox))
        })
    }

    fn gap_ahead(&self, state: &LevelState) -> bool {
        let ahead = self.lookahead_rect(state);
        let feet = Rect::new(ahead.x, ahead.bottom(), ahead.w, 2.0);
        !state
            .obstacles
            .iter()
            .filter(|o| o.is_solid() && o.is_visible())
            .filter_map(|o| o.hitbox())
            .any(|hitbox| intersects(&feet, &hitbox))
    }
}
