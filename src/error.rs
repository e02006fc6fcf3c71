//! Error types
//!
//! Nothing here is fatal: every variant is recovered where it is raised.

use thiserror::Error;

/// Audio failures. Recovered locally, never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// Asset missing or undecodable; the cue falls back to a synthetic tone
    #[error("could not load sound `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },
    /// Playback refused (autoplay policy, device hiccup)
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
    /// No audio output available at all
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

/// Invalid settings. Callers fall back to defaults.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
