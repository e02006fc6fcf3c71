//! Game orchestrator
//!
//! Owns the simulation, the audio layer and the HUD. Every input runs the
//! pure rules in `sim`, then drains the recorded events in order and turns
//! them into sounds and HUD updates.

use glam::Vec2;

use crate::audio::{AudioBackend, AudioFeedback};
use crate::render::{self, Painter};
use crate::settings::Settings;
use crate::sim::{self, Bounds, GameEvent, GameState, ShotOutcome, Summary};

/// Notification colors
pub const INFO_COLOR: &str = "#4afcff";
pub const MISS_COLOR: &str = "#ff5555";

/// Running numbers shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub score: u64,
    pub hits: u32,
    pub misses: u32,
    pub targets_left: usize,
}

/// Display side of the game (DOM in the browser)
pub trait Hud {
    fn show_stats(&mut self, stats: &Stats);
    /// Transient text banner
    fn notify(&mut self, text: &str, color: &str);
    fn show_game_over(&mut self, summary: &Summary);
    fn hide_game_over(&mut self);
    /// Reflect mute state on the sound toggle
    fn show_mute(&mut self, muted: bool);
    /// Brief "sound playing" indicator
    fn pulse_sound_wave(&mut self);
}

/// Game instance holding all state
pub struct Game<B: AudioBackend, H: Hud> {
    pub state: GameState,
    pub audio: AudioFeedback<B>,
    pub hud: H,
    /// Set by the first accepted click; browsers only allow music after a gesture
    user_interacted: bool,
}

impl<B: AudioBackend, H: Hud> Game<B, H> {
    pub fn new(settings: &Settings, bounds: Bounds, backend: B, hud: H, seed: u64) -> Self {
        let mut audio = AudioFeedback::new(
            backend,
            settings.audio.sfx_volume,
            settings.audio.music_volume,
        );
        audio.load_manifest(
            settings
                .audio
                .manifest
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        audio.set_muted(settings.audio.start_muted);

        let mut game = Self {
            state: GameState::new(bounds, settings.rules.clone(), seed),
            audio,
            hud,
            user_interacted: false,
        };

        let muted = game.audio.is_muted();
        game.hud.show_mute(muted);
        game.dispatch_events();
        game.refresh_hud();
        game
    }

    /// Pointer moved to canvas coordinates (any phase)
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.state.cursor = pos;
    }

    /// Canvas clicked. Ignored once the game is over.
    pub fn click(&mut self, pos: Vec2) -> ShotOutcome {
        if !self.state.is_active() {
            return ShotOutcome::Ignored;
        }

        if !self.user_interacted {
            self.user_interacted = true;
            self.audio.start_background_music();
        }

        let outcome = sim::handle_shot(&mut self.state, pos);
        self.dispatch_events();
        self.refresh_hud();
        outcome
    }

    /// Full reset after (or during) a run
    pub fn new_game(&mut self) {
        self.audio.stop_background_music();
        self.state.reset();
        self.hud.hide_game_over();
        // Respawning wave 1 restarts the music through dispatch
        self.dispatch_events();
        self.refresh_hud();
    }

    /// Flip mute and sync the toggle
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        self.hud.show_mute(muted);
        muted
    }

    /// One display refresh: advance the simulation
    pub fn frame(&mut self) {
        self.audio.apply_load_failures();
        sim::advance_frame(&mut self.state);
    }

    /// Draw the current frame
    pub fn render<P: Painter>(&self, painter: &mut P) {
        render::draw_frame(&self.state, self.audio.is_muted(), painter);
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.state.set_bounds(bounds);
    }

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.state.score,
            hits: self.state.hits,
            misses: self.state.misses,
            targets_left: self.state.targets.len(),
        }
    }

    fn refresh_hud(&mut self) {
        let stats = self.stats();
        self.hud.show_stats(&stats);
    }

    fn play(&mut self, key: &str) {
        if self.audio.play(key) {
            self.hud.pulse_sound_wave();
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Shot { .. } => self.play("shoot"),
                GameEvent::TargetHit { points, .. } => {
                    self.play("hit");
                    self.hud.notify(&format!("+{points} POINTS!"), INFO_COLOR);
                }
                GameEvent::Missed { .. } => {
                    self.play("miss");
                    self.hud.notify("MISS!", MISS_COLOR);
                }
                GameEvent::GameOver(summary) => {
                    self.play("gameOver");
                    self.audio.pause_background_music();
                    self.hud.show_game_over(&summary);
                }
                GameEvent::WaveCleared { .. } => self.play("win"),
                GameEvent::WaveSpawned { wave, count } => {
                    self.hud
                        .notify(&format!("WAVE {wave} - {count} TARGETS!"), INFO_COLOR);
                    if wave == 1 {
                        self.play("gameStart");
                        self.audio.start_background_music();
                    }
                }
            }
        }
    }
}
