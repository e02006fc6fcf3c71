//! Audio feedback
//!
//! Named sound cues plus one looping background track. Every cue that cannot
//! be loaded is replaced by a short synthesized tone, so `play` is audible
//! even with no assets at all. Playback is fire-and-forget: rejections are
//! logged and dropped on purpose, and never reach gameplay.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AudioError;

/// Manifest key of the looping background track
pub const MUSIC_KEY: &str = "background";

/// Completion of a playback request. Failure is expected (autoplay policy).
pub type PlaybackCallback = Box<dyn FnOnce(Result<(), AudioError>)>;
/// Invoked if a clip fails to load after `load_clip` returned it
pub type LoadErrorCallback = Box<dyn FnOnce(AudioError)>;

/// A loaded (or loading) audio asset
pub trait Clip {
    /// Start playing from the current position. Returns immediately; the
    /// outcome arrives later through `on_settled`.
    fn play(&self, on_settled: PlaybackCallback);
    fn pause(&self);
    /// Seek to time zero
    fn rewind(&self);
    /// Volume in 0.0 - 1.0 (already clamped)
    fn set_volume(&self, volume: f32);
    fn set_looping(&self, looping: bool);
}

/// Platform audio access
pub trait AudioBackend {
    type Clip: Clip;

    /// Begin loading an asset. Synchronous failures return `Err`; failures
    /// discovered later are reported through `on_error`.
    fn load_clip(&self, path: &str, on_error: LoadErrorCallback) -> Result<Self::Clip, AudioError>;

    /// Play a generated tone
    fn play_tone(&self, tone: &SyntheticTone) -> Result<(), AudioError>;
}

/// Fallback beep for a cue whose asset is unavailable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticTone {
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    pub gain: f32,
}

impl SyntheticTone {
    /// Distinct pitches for the core cues, 440 Hz for everything else
    pub fn for_cue(key: &str) -> Self {
        let frequency = match key {
            "shoot" => 800.0,
            "hit" => 600.0,
            "miss" => 200.0,
            _ => 440.0,
        };
        Self {
            frequency,
            duration: 0.1,
            gain: 0.1,
        }
    }
}

/// A playable cue: the real asset or its synthesized stand-in
pub enum Cue<C> {
    Clip(C),
    Tone(SyntheticTone),
}

impl<C: Clip> Cue<C> {
    /// Play from the start. Errors are logged and discarded.
    fn trigger<B: AudioBackend<Clip = C>>(&self, key: &str, backend: &B) {
        match self {
            Cue::Clip(clip) => {
                clip.rewind();
                let key = key.to_string();
                clip.play(Box::new(move |result| {
                    if let Err(e) = result {
                        log::debug!("Playback failed for {key}: {e}");
                    }
                }));
            }
            Cue::Tone(tone) => {
                log::debug!("Playing fallback sound: {key}");
                if let Err(e) = backend.play_tone(tone) {
                    log::debug!("Fallback tone failed for {key}: {e}");
                }
            }
        }
    }

    /// Only real clips have a volume; returns whether it was applied
    fn set_volume(&self, volume: f32) -> bool {
        match self {
            Cue::Clip(clip) => {
                clip.set_volume(volume);
                true
            }
            Cue::Tone(_) => false,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Cue::Tone(_))
    }
}

/// Shared with in-flight playback callbacks
#[derive(Debug, Default)]
struct MusicFlags {
    playing: Cell<bool>,
    /// Bumped on every pause/stop so stale successes are ignored
    epoch: Cell<u32>,
}

/// Audio manager for the game
pub struct AudioFeedback<B: AudioBackend> {
    backend: B,
    cues: HashMap<String, Cue<B::Clip>>,
    music: Option<B::Clip>,
    music_flags: Rc<MusicFlags>,
    /// Music should be playing whenever not muted
    music_wanted: bool,
    muted: bool,
    sfx_volume: f32,
    music_volume: f32,
    /// Keys whose asset failed after loading started
    failed_loads: Rc<RefCell<Vec<(String, AudioError)>>>,
}

impl<B: AudioBackend> AudioFeedback<B> {
    pub fn new(backend: B, sfx_volume: f32, music_volume: f32) -> Self {
        Self {
            backend,
            cues: HashMap::new(),
            music: None,
            music_flags: Rc::new(MusicFlags::default()),
            music_wanted: false,
            muted: false,
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            music_volume: music_volume.clamp(0.0, 1.0),
            failed_loads: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Load every manifest entry; anything that fails becomes a synthetic tone
    pub fn load_manifest<'a>(&mut self, entries: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, path) in entries {
            let failed = Rc::clone(&self.failed_loads);
            let owned_key = key.to_string();
            let on_error: LoadErrorCallback = Box::new(move |e| {
                failed.borrow_mut().push((owned_key, e));
            });

            match self.backend.load_clip(path, on_error) {
                Ok(clip) if key == MUSIC_KEY => {
                    clip.set_looping(true);
                    clip.set_volume(self.music_volume);
                    self.music = Some(clip);
                }
                Ok(clip) => {
                    clip.set_volume(self.sfx_volume);
                    self.cues.insert(key.to_string(), Cue::Clip(clip));
                }
                Err(e) => self.fall_back(key, &e),
            }
            log::debug!("Requested sound {key} from {path}");
        }
    }

    /// Swap in fallbacks for assets that failed since the last call
    pub fn apply_load_failures(&mut self) {
        let failed: Vec<_> = self.failed_loads.borrow_mut().drain(..).collect();
        for (key, e) in failed {
            self.fall_back(&key, &e);
        }
    }

    fn fall_back(&mut self, key: &str, e: &AudioError) {
        log::warn!("Could not load sound {key} ({e}), using fallback");
        if key == MUSIC_KEY {
            self.music = None;
            self.music_flags.playing.set(false);
            self.bump_epoch();
        } else {
            self.cues
                .insert(key.to_string(), Cue::Tone(SyntheticTone::for_cue(key)));
        }
    }

    /// Play a cue from the start. Returns whether anything was triggered.
    pub fn play(&mut self, key: &str) -> bool {
        self.apply_load_failures();
        if self.muted {
            return false;
        }

        match self.cues.get(key) {
            Some(cue) => {
                cue.trigger(key, &self.backend);
                true
            }
            None => {
                log::debug!("No sound registered for {key}");
                false
            }
        }
    }

    /// Start the background track unless muted or already playing
    pub fn start_background_music(&mut self) {
        if self.muted || self.music.is_none() || self.music_flags.playing.get() {
            return;
        }
        self.music_wanted = true;
        self.request_music();
    }

    /// Pause, keeping the position
    pub fn pause_background_music(&mut self) {
        self.halt_music();
        self.music_wanted = false;
    }

    /// Continue from the paused position
    pub fn resume_background_music(&mut self) {
        if self.muted || self.music.is_none() || self.music_flags.playing.get() {
            return;
        }
        self.music_wanted = true;
        self.request_music();
    }

    /// Stop and rewind to the beginning
    pub fn stop_background_music(&mut self) {
        self.halt_music();
        self.music_wanted = false;
        if let Some(music) = &self.music {
            music.rewind();
        }
    }

    /// Flip mute. Muting pauses the music; unmuting resumes it if it was wanted.
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        if muted {
            self.halt_music();
        } else if self.music_wanted && !self.music_flags.playing.get() {
            self.request_music();
        }
        log::info!("Sound {}", if muted { "off" } else { "on" });
    }

    /// Set a clip's volume (clamped to 0.0 - 1.0). Fallback tones are unaffected.
    pub fn set_volume(&mut self, key: &str, value: f32) -> bool {
        let volume = value.clamp(0.0, 1.0);
        if key == MUSIC_KEY {
            return match &self.music {
                Some(music) => {
                    music.set_volume(volume);
                    self.music_volume = volume;
                    true
                }
                None => false,
            };
        }
        self.cues.get(key).is_some_and(|cue| cue.set_volume(volume))
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether the background track has confirmed playback
    pub fn is_music_playing(&self) -> bool {
        self.music_flags.playing.get()
    }

    /// Whether `key` is served by a synthetic tone
    pub fn is_fallback(&self, key: &str) -> bool {
        self.cues.get(key).is_some_and(|cue| cue.is_fallback())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn request_music(&self) {
        let Some(music) = &self.music else { return };
        let flags = Rc::clone(&self.music_flags);
        let epoch = flags.epoch.get();
        music.play(Box::new(move |result| match result {
            Ok(()) if flags.epoch.get() == epoch => {
                flags.playing.set(true);
                log::info!("Background music started");
            }
            Ok(()) => log::debug!("Background music started after it was halted"),
            Err(e) => log::debug!("Background music play failed: {e}"),
        }));
    }

    fn halt_music(&self) {
        let Some(music) = &self.music else { return };
        if self.music_wanted || self.music_flags.playing.get() {
            music.pause();
        }
        self.music_flags.playing.set(false);
        self.bump_epoch();
    }

    fn bump_epoch(&self) {
        let epoch = &self.music_flags.epoch;
        epoch.set(epoch.get().wrapping_add(1));
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, FakeBackend, MANIFEST};
    use super::*;

    fn feedback(backend: &FakeBackend) -> AudioFeedback<FakeBackend> {
        let mut audio = AudioFeedback::new(backend.clone(), 0.5, 0.3);
        audio.load_manifest(MANIFEST);
        backend.clear_calls();
        audio
    }

    #[test]
    fn test_tone_pitches() {
        assert_eq!(SyntheticTone::for_cue("shoot").frequency, 800.0);
        assert_eq!(SyntheticTone::for_cue("hit").frequency, 600.0);
        assert_eq!(SyntheticTone::for_cue("miss").frequency, 200.0);
        assert_eq!(SyntheticTone::for_cue("gameOver").frequency, 440.0);
    }

    #[test]
    fn test_manifest_sets_volumes_and_loop() {
        let backend = FakeBackend::default();
        let mut audio = AudioFeedback::new(backend.clone(), 0.5, 0.3);
        audio.load_manifest(MANIFEST);
        let calls = backend.calls();
        assert!(calls.contains(&Call::Volume("shoot".into(), 0.5)));
        assert!(calls.contains(&Call::Looping(MUSIC_KEY.into(), true)));
        assert!(calls.contains(&Call::Volume(MUSIC_KEY.into(), 0.3)));
        assert!(!audio.is_fallback("shoot"));
    }

    #[test]
    fn test_play_rewinds_then_plays() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        assert!(audio.play("hit"));
        assert_eq!(
            backend.calls(),
            vec![Call::Rewind("hit".into()), Call::Play("hit".into())]
        );
        // Rejection is swallowed
        backend.settle_all(false);
        assert!(audio.play("hit"));
    }

    #[test]
    fn test_missing_asset_falls_back_to_tone() {
        let backend = FakeBackend::with_missing(&["shoot", "miss"]);
        let mut audio = feedback(&backend);
        assert!(audio.is_fallback("shoot"));
        assert!(audio.is_fallback("miss"));
        assert!(!audio.is_fallback("hit"));

        audio.play("shoot");
        audio.play("miss");
        assert_eq!(backend.calls(), vec![Call::Tone(800.0), Call::Tone(200.0)]);
    }

    #[test]
    fn test_deferred_load_failure_falls_back() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        backend.fail_load("hit");
        assert!(audio.play("hit"));
        assert!(audio.is_fallback("hit"));
        assert_eq!(backend.calls(), vec![Call::Tone(600.0)]);
    }

    #[test]
    fn test_unknown_key_plays_nothing() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        assert!(!audio.play("explosion"));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_muted_play_is_noop() {
        let backend = FakeBackend::with_missing(&["shoot"]);
        let mut audio = feedback(&backend);
        assert!(audio.toggle_mute());
        assert!(!audio.play("shoot"));
        assert!(!audio.play("hit"));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_music_flag_set_only_on_success() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);

        audio.start_background_music();
        assert!(!audio.is_music_playing());
        backend.settle_all(false);
        assert!(!audio.is_music_playing());

        // Retry after rejection
        audio.start_background_music();
        backend.settle_all(true);
        assert!(audio.is_music_playing());

        // Idempotent while playing
        backend.clear_calls();
        audio.start_background_music();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_start_while_muted_is_noop() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        audio.toggle_mute();
        backend.clear_calls();

        audio.start_background_music();
        audio.resume_background_music();
        assert!(backend.calls().is_empty());

        // Never started, so unmuting does not start it
        audio.toggle_mute();
        assert!(backend.calls().is_empty());
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_unmute_resumes_started_music() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        audio.start_background_music();
        backend.settle_all(true);

        assert!(audio.toggle_mute());
        assert!(!audio.is_music_playing());
        assert!(backend.calls().contains(&Call::Pause(MUSIC_KEY.into())));

        backend.clear_calls();
        assert!(!audio.toggle_mute());
        // Resumed without rewinding
        assert_eq!(backend.calls(), vec![Call::Play(MUSIC_KEY.into())]);
        backend.settle_all(true);
        assert!(audio.is_music_playing());
    }

    #[test]
    fn test_success_after_mute_is_ignored() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        audio.start_background_music();
        audio.toggle_mute();
        backend.settle_all(true);
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_stop_rewinds_and_pause_keeps_position() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        audio.start_background_music();
        backend.settle_all(true);
        backend.clear_calls();

        audio.pause_background_music();
        assert_eq!(backend.calls(), vec![Call::Pause(MUSIC_KEY.into())]);
        assert!(!audio.is_music_playing());

        audio.resume_background_music();
        backend.settle_all(true);
        assert!(audio.is_music_playing());
        backend.clear_calls();

        audio.stop_background_music();
        assert_eq!(
            backend.calls(),
            vec![Call::Pause(MUSIC_KEY.into()), Call::Rewind(MUSIC_KEY.into())]
        );
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_paused_music_stays_paused_across_mute_toggle() {
        let backend = FakeBackend::default();
        let mut audio = feedback(&backend);
        audio.start_background_music();
        backend.settle_all(true);
        audio.pause_background_music();
        backend.clear_calls();

        audio.toggle_mute();
        audio.toggle_mute();
        assert!(!backend.calls().contains(&Call::Play(MUSIC_KEY.into())));
    }

    #[test]
    fn test_missing_music_is_silent() {
        let backend = FakeBackend::with_missing(&[MUSIC_KEY]);
        let mut audio = feedback(&backend);
        audio.start_background_music();
        assert!(backend.calls().is_empty());
        assert!(!audio.is_music_playing());
        assert!(!audio.set_volume(MUSIC_KEY, 0.5));
    }

    #[test]
    fn test_set_volume_clamps_real_clips_only() {
        let backend = FakeBackend::with_missing(&["miss"]);
        let mut audio = feedback(&backend);

        assert!(audio.set_volume("hit", 1.7));
        assert!(audio.set_volume("shoot", -0.2));
        assert!(!audio.set_volume("miss", 0.4));
        assert!(!audio.set_volume("nope", 0.4));
        assert_eq!(
            backend.calls(),
            vec![
                Call::Volume("hit".into(), 1.0),
                Call::Volume("shoot".into(), 0.0),
            ]
        );
    }
}
