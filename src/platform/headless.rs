//! Headless platform
//!
//! No audio device and no display: every cue becomes a (silent) synthetic
//! tone and HUD updates go to the log. Used by the native binary.

use crate::audio::{AudioBackend, Clip, LoadErrorCallback, PlaybackCallback, SyntheticTone};
use crate::error::AudioError;
use crate::game::{Hud, Stats};
use crate::sim::Summary;

/// Backend without an output device
#[derive(Debug, Default)]
pub struct SilentBackend;

/// Never constructed: `SilentBackend` cannot load clips
#[derive(Debug)]
pub enum NoClip {}

impl Clip for NoClip {
    fn play(&self, _on_settled: PlaybackCallback) {
        match *self {}
    }

    fn pause(&self) {
        match *self {}
    }

    fn rewind(&self) {
        match *self {}
    }

    fn set_volume(&self, _volume: f32) {
        match *self {}
    }

    fn set_looping(&self, _looping: bool) {
        match *self {}
    }
}

impl AudioBackend for SilentBackend {
    type Clip = NoClip;

    fn load_clip(&self, path: &str, _on_error: LoadErrorCallback) -> Result<NoClip, AudioError> {
        Err(AudioError::AssetLoad {
            path: path.to_string(),
            reason: "no audio device".into(),
        })
    }

    fn play_tone(&self, tone: &SyntheticTone) -> Result<(), AudioError> {
        log::trace!("tone {} Hz for {}s", tone.frequency, tone.duration);
        Ok(())
    }
}

/// HUD that logs what a player would see
#[derive(Debug, Default)]
pub struct LogHud {
    pub last_stats: Option<Stats>,
    pub final_summary: Option<Summary>,
}

impl Hud for LogHud {
    fn show_stats(&mut self, stats: &Stats) {
        if self.last_stats.as_ref() != Some(stats) {
            log::debug!(
                "score {} | hits {} | misses {} | targets {}",
                stats.score,
                stats.hits,
                stats.misses,
                stats.targets_left
            );
        }
        self.last_stats = Some(*stats);
    }

    fn notify(&mut self, text: &str, _color: &str) {
        log::info!("{text}");
    }

    fn show_game_over(&mut self, summary: &Summary) {
        log::info!(
            "GAME OVER - score {}, hits {}, misses {}, accuracy {}%",
            summary.score,
            summary.hits,
            summary.misses,
            summary.accuracy
        );
        self.final_summary = Some(*summary);
    }

    fn hide_game_over(&mut self) {
        self.final_summary = None;
    }

    fn show_mute(&mut self, muted: bool) {
        log::info!("Sound {}", if muted { "OFF" } else { "ON" });
    }

    fn pulse_sound_wave(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::settings::Settings;
    use crate::sim::{Bounds, GamePhase};
    use glam::Vec2;

    #[test]
    fn test_headless_game_uses_fallbacks() {
        let mut game = Game::new(
            &Settings::default(),
            Bounds::new(800.0, 600.0),
            SilentBackend,
            LogHud::default(),
            3,
        );
        assert!(game.audio.is_fallback("shoot"));
        assert!(game.audio.is_fallback("win"));
        assert!(!game.audio.play("background"));
        assert!(game.audio.play("shoot"));

        for _ in 0..5 {
            game.click(Vec2::new(1.0, 1.0));
        }
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert_eq!(game.hud.final_summary.map(|s| s.misses), Some(5));

        game.new_game();
        assert!(game.hud.final_summary.is_none());
    }
}
