//! wasm-bindgen entry points
//!
//! The page owns the animation-frame loop, DOM screens and audio; it calls
//! `step` once per frame with the currently held keys.

use wasm_bindgen::prelude::*;

use crate::levels::LevelCatalog;
use crate::progress::Progress;
use crate::session::{Session, SessionEvent};
use crate::sim::TickInput;
use crate::tuning::Tuning;

/// Per-step result codes returned to JavaScript
const EVENT_RUNNING: u8 = 0;
const EVENT_RESTARTED: u8 = 1;
const EVENT_ADVANCED: u8 = 2;
const EVENT_FINISHED: u8 = 3;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A browser-driven run through the built-in levels
#[wasm_bindgen]
pub struct WebGame {
    session: Session<Progress>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(start_level: u32) -> Result<WebGame, JsValue> {
        let catalog = LevelCatalog::builtin().map_err(to_js)?;
        let progress = Progress::load(catalog.len());
        let session =
            Session::new(catalog, Tuning::default(), progress, start_level).map_err(to_js)?;
        Ok(Self { session })
    }

    /// Level select; an invalid number is refused and the current attempt kept
    pub fn select_level(&mut self, level: u32) -> Result<(), JsValue> {
        self.session.select_level(level).map_err(to_js)
    }

    pub fn step(&mut self, left: bool, right: bool, jump: bool) -> Result<u8, JsValue> {
        let input = TickInput { left, right, jump };
        let event = self.session.step(&input).map_err(to_js)?;
        Ok(match event {
            SessionEvent::Running => EVENT_RUNNING,
            SessionEvent::Restarted { .. } => EVENT_RESTARTED,
            SessionEvent::Advanced { .. } => EVENT_ADVANCED,
            SessionEvent::Finished => EVENT_FINISHED,
        })
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn level_count(&self) -> u32 {
        self.session.catalog().len()
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.session.progress().is_completed(level)
    }

    /// Render view for the current frame
    pub fn frame_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.frame()).map_err(to_js)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
