//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - Seeded RNG only
//! - One step per display frame
//! - Side effects are reported as `GameEvent`s, never performed
//! - No rendering, audio or platform dependencies

pub mod state;
pub mod target;
pub mod tick;
pub mod wave;

pub use state::{GameEvent, GamePhase, GameState, MarkerKind, ShotMarker, Summary};
pub use target::{Bounds, Target};
pub use tick::{ShotOutcome, advance_frame, handle_shot};
pub use wave::spawn_wave;
