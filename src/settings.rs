//! Game settings
//!
//! Rules and audio tuning. Never persisted; the page may embed an inline JSON
//! block to override the defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Gameplay rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Misses that end the run
    pub max_misses: u32,
    /// Targets spawned per wave
    pub targets_per_wave: usize,
    pub target_radius: f32,
    pub target_points: u32,
    /// Full width of the per-axis velocity range (units per frame)
    pub max_speed: f32,
    /// Minimum center-to-center distance between targets of one wave
    pub min_separation: f32,
    /// Distance from the canvas edge to the spawn area
    pub spawn_margin: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_misses: MAX_MISSES,
            targets_per_wave: TARGETS_PER_WAVE,
            target_radius: TARGET_RADIUS,
            target_points: TARGET_POINTS,
            max_speed: TARGET_MAX_SPEED,
            min_separation: MIN_SEPARATION,
            spawn_margin: SPAWN_MARGIN,
        }
    }
}

/// Audio preferences and the asset manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume for one-shot cues (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background track volume (0.0 - 1.0)
    pub music_volume: f32,
    pub start_muted: bool,
    /// Cue name -> asset path
    pub manifest: BTreeMap<String, String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        let manifest = [
            ("shoot", "assets/sounds/shoot.mp3"),
            ("hit", "assets/sounds/hit.mp3"),
            ("miss", "assets/sounds/miss.mp3"),
            ("gameStart", "assets/sounds/game start.mp3"),
            ("gameOver", "assets/sounds/game over.mp3"),
            ("win", "assets/sounds/win.mp3"),
            ("background", "assets/sounds/background game sound.mp3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            sfx_volume: 0.5,
            music_volume: 0.3,
            start_muted: false,
            manifest,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: Rules,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game cannot run with. Volumes are clamped later, not rejected.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let rules = &self.rules;
        if rules.max_misses == 0 {
            return Err(invalid("max_misses", "must be at least 1"));
        }
        if rules.targets_per_wave == 0 {
            return Err(invalid("targets_per_wave", "must be at least 1"));
        }
        for (field, value) in [
            ("target_radius", rules.target_radius),
            ("min_separation", rules.min_separation),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        for (field, value) in [
            ("max_speed", rules.max_speed),
            ("spawn_margin", rules.spawn_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }
        if rules.spawn_margin < rules.target_radius {
            return Err(invalid(
                "spawn_margin",
                format!(
                    "must be at least target_radius ({}), got {}",
                    rules.target_radius, rules.spawn_margin
                ),
            ));
        }
        Ok(())
    }

    /// DOM id of the optional inline settings block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "game-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring settings block: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}
