//! Level manager
//!
//! Drives one player's run through the catalog: steps the current attempt,
//! reloads the level on death and advances on completion. Reloads always
//! happen between steps, so no frame sees a half-reset level.

use crate::error::LevelResult;
use crate::levels::LevelCatalog;
use crate::progress::ProgressStore;
use crate::render::Frame;
use crate::sim::{LevelState, Outcome, TickInput, step};
use crate::tuning::Tuning;

/// What the session did in response to a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Attempt continues
    Running,
    /// Player died; the same level was reloaded
    Restarted { level: u32, deaths: u32 },
    /// Level completed; the next one was loaded
    Advanced { from: u32, to: u32 },
    /// The last level was completed
    Finished,
}

/// A run through the level catalog
#[derive(Debug)]
pub struct Session<P: ProgressStore> {
    catalog: LevelCatalog,
    tuning: Tuning,
    state: LevelState,
    progress: P,
    /// Deaths per level, indexed by level - 1
    deaths: Vec<u32>,
    finished: bool,
}

impl<P: ProgressStore> Session<P> {
    pub fn new(
        catalog: LevelCatalog,
        tuning: Tuning,
        progress: P,
        start_level: u32,
    ) -> LevelResult<Self> {
        let state = LevelState::load(&catalog, start_level, tuning)?;
        let deaths = vec![0; catalog.len() as usize];
        Ok(Self {
            catalog,
            tuning,
            state,
            progress,
            deaths,
            finished: false,
        })
    }

    /// Jump to a level (level select). An invalid number leaves the current attempt untouched
    pub fn select_level(&mut self, level: u32) -> LevelResult<()> {
        match LevelState::load(&self.catalog, level, self.tuning) {
            Ok(state) => {
                self.state = state;
                self.finished = false;
                Ok(())
            }
            Err(e) => {
                log::warn!("Refusing level selection: {e}");
                Err(e)
            }
        }
    }

    /// Restart the current level from scratch
    pub fn restart(&mut self) -> LevelResult<()> {
        self.state = LevelState::load(&self.catalog, self.state.level, self.tuning)?;
        Ok(())
    }

    /// Advance one frame and handle any terminal outcome
    pub fn step(&mut self, input: &TickInput) -> LevelResult<SessionEvent> {
        if self.finished {
            return Ok(SessionEvent::Finished);
        }

        let level = self.state.level;
        match step(&mut self.state, input) {
            Outcome::Continue => Ok(SessionEvent::Running),
            Outcome::Died => {
                let deaths = &mut self.deaths[(level - 1) as usize];
                *deaths += 1;
                log::info!("Player died on level {} (death #{}), restarting", level, deaths);
                let deaths = *deaths;
                self.restart()?;
                Ok(SessionEvent::Restarted { level, deaths })
            }
            Outcome::Completed => {
                self.progress.mark_completed(level);
                if level < self.catalog.len() {
                    let next = level + 1;
                    self.state = LevelState::load(&self.catalog, next, self.tuning)?;
                    Ok(SessionEvent::Advanced { from: level, to: next })
                } else {
                    log::info!("All {} levels complete!", self.catalog.len());
                    self.finished = true;
                    Ok(SessionEvent::Finished)
                }
            }
        }
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn deaths(&self, level: u32) -> u32 {
        level
            .checked_sub(1)
            .and_then(|i| self.deaths.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_deaths(&self) -> u32 {
        self.deaths.iter().sum()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }
}
