//! Obstacles and their per-frame behavior
//!
//! Every obstacle is a rectangle plus a `Behavior` carrying only the fields
//! its kind needs. Trap state (trigger latches, displaced positions) lives
//! here and is only ever reset by loading the level again, with the one
//! exception of a collapsing platform that respawns after falling away.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Player;

/// Fieldless obstacle tag, used by the render view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Platform,
    Goal,
    Danger,
    MovingPlatform,
    CollapsingPlatform,
    VanishingPlatform,
    FallingCeiling,
}

/// Region that arms a falling ceiling.
///
/// The player arms it by moving upward while their left edge is within
/// `[min_x, max_x]` and their top edge is at or above `max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerZone {
    pub min_x: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl TriggerZone {
    pub fn contains(&self, player: &Rect) -> bool {
        player.x >= self.min_x && player.x <= self.max_x && player.y <= self.max_y
    }
}

/// Kind-specific data and mutable trap state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Static solid ground
    Platform,
    /// Level exit. A reversed goal is a decoy that kills; a hidden goal still works
    Goal { reversed: bool, hidden: bool },
    /// Kills on touch
    Danger { invisible: bool },
    /// Oscillates horizontally between `min_x` and `max_x`
    MovingPlatform {
        speed: f32,
        min_x: f32,
        max_x: f32,
        /// Distance actually moved by the last update, less than `speed` on
        /// the frame it is clamped onto a bound
        last_dx: f32,
    },
    /// Drops away once stood on, respawning at `initial_y` after leaving the playfield
    CollapsingPlatform {
        triggered: bool,
        initial_y: f32,
        fall_speed: f32,
    },
    /// Shrinks to nothing once stood on or bumped from below
    VanishingPlatform { triggered: bool, shrink_rate: f32 },
    /// Drops when the player jumps inside its trigger zone; deadly while falling
    FallingCeiling {
        triggered: bool,
        vel_y: f32,
        initial_y: f32,
        trigger: TriggerZone,
        fall_speed: f32,
        boost_depth: f32,
        boosted_fall_speed: f32,
    },
}

/// A positioned obstacle instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub behavior: Behavior,
}

impl Obstacle {
    pub fn new(rect: Rect, behavior: Behavior) -> Self {
        Self { rect, behavior }
    }

    pub fn platform(rect: Rect) -> Self {
        Self::new(rect, Behavior::Platform)
    }

    pub fn goal(rect: Rect) -> Self {
        Self::new(
            rect,
            Behavior::Goal {
                reversed: false,
                hidden: false,
            },
        )
    }

    pub fn reversed_goal(rect: Rect) -> Self {
        Self::new(
            rect,
            Behavior::Goal {
                reversed: true,
                hidden: false,
            },
        )
    }

    pub fn danger(rect: Rect) -> Self {
        Self::new(rect, Behavior::Danger { invisible: false })
    }

    pub fn moving_platform(rect: Rect, speed: f32, min_x: f32, max_x: f32) -> Self {
        Self::new(
            rect,
            Behavior::MovingPlatform {
                speed,
                min_x,
                max_x,
                last_dx: 0.0,
            },
        )
    }

    pub fn collapsing_platform(rect: Rect, fall_speed: f32) -> Self {
        Self::new(
            rect,
            Behavior::CollapsingPlatform {
                triggered: false,
                initial_y: rect.y,
                fall_speed,
            },
        )
    }

    pub fn vanishing_platform(rect: Rect, shrink_rate: f32) -> Self {
        Self::new(
            rect,
            Behavior::VanishingPlatform {
                triggered: false,
                shrink_rate,
            },
        )
    }

    pub fn falling_ceiling(
        rect: Rect,
        trigger: TriggerZone,
        fall_speed: f32,
        boost_depth: f32,
        boosted_fall_speed: f32,
    ) -> Self {
        Self::new(
            rect,
            Behavior::FallingCeiling {
                triggered: false,
                vel_y: 0.0,
                initial_y: rect.y,
                trigger,
                fall_speed,
                boost_depth,
                boosted_fall_speed,
            },
        )
    }

    pub fn kind(&self) -> ObstacleKind {
        match self.behavior {
            Behavior::Platform => ObstacleKind::Platform,
            Behavior::Goal { .. } => ObstacleKind::Goal,
            Behavior::Danger { .. } => ObstacleKind::Danger,
            Behavior::MovingPlatform { .. } => ObstacleKind::MovingPlatform,
            Behavior::CollapsingPlatform { .. } => ObstacleKind::CollapsingPlatform,
            Behavior::VanishingPlatform { .. } => ObstacleKind::VanishingPlatform,
            Behavior::FallingCeiling { .. } => ObstacleKind::FallingCeiling,
        }
    }

    /// Platforms the player can stand on or bump into
    pub fn is_solid(&self) -> bool {
        matches!(
            self.behavior,
            Behavior::Platform
                | Behavior::MovingPlatform { .. }
                | Behavior::CollapsingPlatform { .. }
                | Behavior::VanishingPlatform { .. }
        )
    }

    /// Whether the trap latch is currently set (false for obstacles without one)
    pub fn is_triggered(&self) -> bool {
        match self.behavior {
            Behavior::CollapsingPlatform { triggered, .. }
            | Behavior::VanishingPlatform { triggered, .. }
            | Behavior::FallingCeiling { triggered, .. } => triggered,
            _ => false,
        }
    }

    /// Whether an external renderer should draw this obstacle
    pub fn is_visible(&self) -> bool {
        match self.behavior {
            Behavior::Danger { invisible } => !invisible,
            Behavior::Goal { hidden, .. } => !hidden,
            Behavior::VanishingPlatform { .. } => !self.rect.is_empty(),
            _ => true,
        }
    }

    /// Rectangle to test for collision, `None` once nothing is left of it
    pub fn hitbox(&self) -> Option<Rect> {
        (!self.rect.is_empty()).then_some(self.rect)
    }

    /// Advance autonomous behavior by one frame.
    ///
    /// Runs before this obstacle is tested against the player, so the
    /// player collides with the obstacle exactly where it is drawn.
    pub fn update(&mut self, player: &Player, playfield_height: f32) {
        match &mut self.behavior {
            Behavior::Platform | Behavior::Goal { .. } | Behavior::Danger { .. } => {}

            Behavior::MovingPlatform {
                speed,
                min_x,
                max_x,
                last_dx,
            } => {
                let start = self.rect.x;
                self.rect.x += *speed;
                if self.rect.x > *max_x {
                    self.rect.x = *max_x;
                    *speed = -speed.abs();
                } else if self.rect.x < *min_x {
                    self.rect.x = *min_x;
                    *speed = speed.abs();
                }
                *last_dx = self.rect.x - start;
            }

            Behavior::CollapsingPlatform {
                triggered,
                initial_y,
                fall_speed,
            } => {
                if *triggered {
                    self.rect.y += *fall_speed;
                    if self.rect.y > playfield_height {
                        self.rect.y = *initial_y;
                        *triggered = false;
                        log::debug!("Collapsing platform respawned at y={}", initial_y);
                    }
                }
            }

            Behavior::VanishingPlatform {
                triggered,
                shrink_rate,
            } => {
                if *triggered {
                    self.rect.w = (self.rect.w - *shrink_rate).max(0.0);
                    self.rect.h = (self.rect.h - *shrink_rate).max(0.0);
                }
            }

            Behavior::FallingCeiling {
                triggered,
                vel_y,
                initial_y,
                trigger,
                fall_speed,
                boost_depth,
                boosted_fall_speed,
            } => {
                if !*triggered && player.vel_y < 0.0 && trigger.contains(&player.rect()) {
                    *triggered = true;
                    *vel_y = *fall_speed;
                    log::debug!("Falling ceiling triggered at player x={}", player.pos.x);
                }
                // Parks once it has left the playfield
                if *triggered && self.rect.y <= playfield_height {
                    self.rect.y += *vel_y;
                    if self.rect.y - *initial_y > *boost_depth {
                        *vel_y = *boosted_fall_speed;
                    }
                }
            }
        }
    }

    /// Set the trap latch in response to the player landing on top
    pub fn on_landed(&mut self) {
        let kind = self.kind();
        match &mut self.behavior {
            Behavior::CollapsingPlatform { triggered, .. }
            | Behavior::VanishingPlatform { triggered, .. } => {
                if !*triggered {
                    *triggered = true;
                    log::debug!("{kind:?} triggered by landing");
                }
            }
            _ => {}
        }
    }

    /// Set the trap latch in response to the player bumping it from below
    pub fn on_bumped(&mut self) {
        if let Behavior::VanishingPlatform { triggered, .. } = &mut self.behavior {
            if !*triggered {
                *triggered = true;
                log::debug!("Vanishing platform triggered by ceiling bump");
            }
        }
    }

    /// Horizontal displacement imparted to a player standing on this obstacle:
    /// how far it moved this frame, not its current speed
    pub fn carry_dx(&self) -> f32 {
        match self.behavior {
            Behavior::MovingPlatform { last_dx, .. } => last_dx,
            _ => 0.0,
        }
    }

    /// Check authored parameters; returns a description of the first problem
    pub fn validate(&self) -> Result<(), String> {
        if !self.rect.is_finite() {
            return Err("rectangle has non-finite coordinates".into());
        }
        if self.rect.is_empty() {
            return Err(format!(
                "rectangle must have positive size, got {}x{}",
                self.rect.w, self.rect.h
            ));
        }

        match self.behavior {
            Behavior::Platform | Behavior::Goal { .. } | Behavior::Danger { .. } => Ok(()),
            Behavior::MovingPlatform { speed, min_x, max_x, .. } => {
                if !(speed.is_finite() && min_x.is_finite() && max_x.is_finite()) {
                    Err("moving platform parameters must be finite".into())
                } else if min_x > max_x {
                    Err(format!("moving platform range is inverted: {min_x} > {max_x}"))
                } else if self.rect.x < min_x || self.rect.x > max_x {
                    Err(format!(
                        "moving platform starts at x={} outside [{min_x}, {max_x}]",
                        self.rect.x
                    ))
                } else {
                    Ok(())
                }
            }
            Behavior::CollapsingPlatform { fall_speed, .. } => positive("fall_speed", fall_speed),
            Behavior::VanishingPlatform { shrink_rate, .. } => positive("shrink_rate", shrink_rate),
            Behavior::FallingCeiling {
                trigger,
                fall_speed,
                boost_depth,
                boosted_fall_speed,
                ..
            } => {
                positive("fall_speed", fall_speed)?;
                positive("boosted_fall_speed", boosted_fall_speed)?;
                if !(boost_depth.is_finite() && boost_depth >= 0.0) {
                    return Err(format!("boost_depth must be non-negative, got {boost_depth}"));
                }
                if trigger.min_x > trigger.max_x {
                    return Err(format!(
                        "trigger zone is inverted: {} > {}",
                        trigger.min_x, trigger.max_x
                    ));
                }
                Ok(())
            }
        }
    }
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be positive, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYFIELD_HEIGHT;
    use proptest::prelude::*;

    fn idle_player() -> Player {
        Player::spawn(&crate::Tuning::default())
    }

    #[test]
    fn test_moving_platform_reverses_at_bounds() {
        let rect = Rect::new(498.0, 250.0, 50.0, 20.0);
        let mut platform = Obstacle::moving_platform(rect, 1.0, 100.0, 500.0);
        let player = idle_player();
        assert_eq!(platform.carry_dx(), 0.0);

        platform.update(&player, PLAYFIELD_HEIGHT);
        platform.update(&player, PLAYFIELD_HEIGHT);
        assert_eq!(platform.rect.x, 500.0);
        assert_eq!(platform.carry_dx(), 1.0);
        platform.update(&player, PLAYFIELD_HEIGHT);
        assert_eq!(platform.rect.x, 500.0);
        assert_eq!(platform.carry_dx(), 0.0);
        platform.update(&player, PLAYFIELD_HEIGHT);
        assert_eq!(platform.rect.x, 499.0);
        assert_eq!(platform.carry_dx(), -1.0);
    }

    #[test]
    fn test_clamped_frame_carries_actual_distance() {
        let rect = Rect::new(499.0, 250.0, 50.0, 20.0);
        let mut platform = Obstacle::moving_platform(rect, 2.0, 100.0, 500.0);
        platform.update(&idle_player(), PLAYFIELD_HEIGHT);
        assert_eq!(platform.rect.x, 500.0);
        assert_eq!(platform.carry_dx(), 1.0);
    }

    #[test]
    fn test_collapsing_platform_idle_until_triggered() {
        let mut platform = Obstacle::collapsing_platform(Rect::new(250.0, 250.0, 50.0, 20.0), 3.0);
        let player = idle_player();
        for _ in 0..10 {
            platform.update(&player, PLAYFIELD_HEIGHT);
        }
        assert_eq!(platform.rect.y, 250.0);

        platform.on_landed();
        platform.update(&player, PLAYFIELD_HEIGHT);
        assert_eq!(platform.rect.y, 253.0);
        assert!(platform.is_triggered());
    }

    #[test]
    fn test_vanishing_platform_shrinks_to_zero() {
        let mut platform = Obstacle::vanishing_platform(Rect::new(400.0, 300.0, 50.0, 20.0), 1.0);
        let player = idle_player();
        platform.on_bumped();
        for _ in 0..100 {
            platform.update(&player, PLAYFIELD_HEIGHT);
        }
        assert_eq!(platform.rect.w, 0.0);
        assert_eq!(platform.rect.h, 0.0);
        assert!(platform.hitbox().is_none());
        assert!(!platform.is_visible());
        assert!(platform.is_triggered());
    }

    #[test]
    fn test_ceiling_requires_upward_motion_in_zone() {
        let zone = TriggerZone {
            min_x: 100.0,
            max_x: 300.0,
            max_y: 320.0,
        };
        let rect = Rect::new(150.0, 0.0, 100.0, 20.0);
        let mut ceiling = Obstacle::falling_ceiling(rect, zone, 2.0, 60.0, 6.0);

        // Standing in the zone does nothing
        let mut player = idle_player();
        player.pos.x = 200.0;
        player.pos.y = 310.0;
        ceiling.update(&player, PLAYFIELD_HEIGHT);
        assert!(!ceiling.is_triggered());

        // Jumping in the zone triggers and integrates in the same frame
        player.vel_y = -7.0;
        ceiling.update(&player, PLAYFIELD_HEIGHT);
        assert!(ceiling.is_triggered());
        assert_eq!(ceiling.rect.y, 2.0);
    }

    #[test]
    fn test_ceiling_speed_steps_up_past_depth() {
        let zone = TriggerZone {
            min_x: 0.0,
            max_x: 600.0,
            max_y: 400.0,
        };
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let mut ceiling = Obstacle::falling_ceiling(rect, zone, 2.0, 10.0, 6.0);
        let mut player = idle_player();
        player.vel_y = -1.0;

        // 2, 4, ... 12 crosses the depth at the sixth frame
        for _ in 0..6 {
            ceiling.update(&player, PLAYFIELD_HEIGHT);
        }
        assert_eq!(ceiling.rect.y, 12.0);
        ceiling.update(&player, PLAYFIELD_HEIGHT);
        assert_eq!(ceiling.rect.y, 18.0);
    }

    #[test]
    fn test_ceiling_parks_below_playfield() {
        let zone = TriggerZone {
            min_x: 0.0,
            max_x: 600.0,
            max_y: 400.0,
        };
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let mut ceiling = Obstacle::falling_ceiling(rect, zone, 5.0, 0.0, 50.0);
        let mut player = idle_player();
        player.vel_y = -1.0;
        for _ in 0..100 {
            ceiling.update(&player, PLAYFIELD_HEIGHT);
        }
        assert!(ceiling.rect.y > PLAYFIELD_HEIGHT);
        assert!(ceiling.rect.y <= PLAYFIELD_HEIGHT + 50.0);
    }

    #[test]
    fn test_landing_does_not_trigger_plain_platforms() {
        let mut platform = Obstacle::platform(Rect::new(0.0, 350.0, 600.0, 50.0));
        platform.on_landed();
        platform.on_bumped();
        assert_eq!(platform, Obstacle::platform(Rect::new(0.0, 350.0, 600.0, 50.0)));
    }

    #[test]
    fn test_bump_does_not_trigger_collapsing() {
        let mut platform = Obstacle::collapsing_platform(Rect::new(250.0, 250.0, 50.0, 20.0), 3.0);
        platform.on_bumped();
        assert!(!platform.is_triggered());
    }

    #[test]
    fn test_visibility() {
        let mut hidden = Obstacle::danger(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(hidden.is_visible());
        hidden.behavior = Behavior::Danger { invisible: true };
        assert!(!hidden.is_visible());

        let goal = Obstacle::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Behavior::Goal {
                reversed: false,
                hidden: true,
            },
        );
        assert!(!goal.is_visible());
    }

    #[test]
    fn test_validate() {
        assert!(Obstacle::platform(Rect::new(0.0, 0.0, 10.0, 10.0)).validate().is_ok());
        assert!(Obstacle::platform(Rect::new(0.0, 0.0, 0.0, 10.0)).validate().is_err());
        assert!(
            Obstacle::moving_platform(Rect::new(100.0, 0.0, 10.0, 10.0), 1.0, 500.0, 100.0)
                .validate()
                .is_err()
        );
        assert!(
            Obstacle::moving_platform(Rect::new(50.0, 0.0, 10.0, 10.0), 1.0, 100.0, 500.0)
                .validate()
                .is_err()
        );
        assert!(
            Obstacle::collapsing_platform(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0)
                .validate()
                .is_err()
        );
        assert!(
            Obstacle::vanishing_platform(Rect::new(0.0, 0.0, 10.0, 10.0), f32::NAN)
                .validate()
                .is_err()
        );
    }

    proptest! {
        #[test]
        fn prop_moving_platform_stays_in_bounds(
            start in 100.0f32..500.0,
            speed in 0.1f32..20.0,
            frames in 1usize..2000,
        ) {
            let rect = Rect::new(start, 250.0, 50.0, 20.0);
            let mut platform = Obstacle::moving_platform(rect, speed, 100.0, 500.0);
            let player = idle_player();
            for _ in 0..frames {
                let before = platform.rect.x;
                platform.update(&player, PLAYFIELD_HEIGHT);
                prop_assert!(platform.rect.x >= 100.0 && platform.rect.x <= 500.0);
                prop_assert_eq!(platform.carry_dx(), platform.rect.x - before);
            }
        }

        #[test]
        fn prop_vanishing_size_never_negative(rate in 0.01f32..100.0, frames in 1usize..500) {
            let mut platform = Obstacle::vanishing_platform(Rect::new(0.0, 0.0, 50.0, 20.0), rate);
            platform.on_landed();
            let player = idle_player();
            for _ in 0..frames {
                platform.update(&player, PLAYFIELD_HEIGHT);
                prop_assert!(platform.rect.w >= 0.0 && platform.rect.h >= 0.0);
                prop_assert!(platform.is_triggered());
            }
        }
    }
}
