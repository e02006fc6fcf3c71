//! Platform abstraction layer
//!
//! Implements the core's seams for each target:
//! - `AudioBackend` (HTML audio elements + Web Audio tones on web)
//! - `Hud` (DOM elements on web, the log on native)
//! - `Painter` (Canvas 2D on web)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod dom_hud;
#[cfg(target_arch = "wasm32")]
pub mod web_audio;
