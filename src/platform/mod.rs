//! Platform abstraction layer
//!
//! Browser bindings for an external driver (renderer frame callback):
//! - Level select / step entry points
//! - Render view as JSON
//! - Progress in LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod web;
