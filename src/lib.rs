//! Target Rush - a canvas target-shooting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, waves, shot rules)
//! - `audio`: Sound cues with synthesized fallbacks and background music
//! - `game`: Orchestrator turning simulation events into audio and HUD calls
//! - `render`: Frame drawing through a `Painter` abstraction
//! - `platform`: Browser bindings (audio elements, DOM HUD, canvas)
//! - `settings`: Tunable rules and audio configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioFeedback, Clip, SyntheticTone};
pub use error::{AudioError, SettingsError};
pub use game::{Game, Hud, Stats};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Misses allowed before the run ends
    pub const MAX_MISSES: u32 = 5;
    /// Targets spawned per wave
    pub const TARGETS_PER_WAVE: usize = 10;

    /// Target defaults
    pub const TARGET_RADIUS: f32 = 20.0;
    pub const TARGET_POINTS: u32 = 10;
    /// Full width of the per-axis velocity range (units per frame)
    pub const TARGET_MAX_SPEED: f32 = 3.0;

    /// Spawn placement
    pub const SPAWN_MARGIN: f32 = 30.0;
    pub const MIN_SEPARATION: f32 = 50.0;
    /// Rejected candidates per target before an overlapping spot is accepted
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 200;

    /// Frames a hit/miss marker stays on screen
    pub const MARKER_FRAMES: u32 = 18;

    /// Spacing of the background reference grid
    pub const GRID_SPACING: f32 = 50.0;
}

/// Accuracy as a rounded percentage; 0 when no shots were taken
#[inline]
pub fn accuracy_percent(hits: u32, misses: u32) -> u32 {
    let shots = hits + misses;
    if shots == 0 {
        return 0;
    }
    (f64::from(hits) / f64::from(shots) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_no_shots() {
        assert_eq!(accuracy_percent(0, 0), 0);
    }

    #[test]
    fn test_accuracy_rounds() {
        assert_eq!(accuracy_percent(1, 2), 33);
        assert_eq!(accuracy_percent(2, 1), 67);
        assert_eq!(accuracy_percent(1, 1), 50);
        assert_eq!(accuracy_percent(0, 5), 0);
        assert_eq!(accuracy_percent(7, 0), 100);
    }
}
