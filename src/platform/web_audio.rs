//! Browser audio: `<audio>` elements for assets, Web Audio oscillators for
//! fallback tones

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, HtmlAudioElement, OscillatorType};

use crate::audio::{AudioBackend, Clip, LoadErrorCallback, PlaybackCallback, SyntheticTone};
use crate::error::AudioError;

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// An asset-backed clip
pub struct HtmlClip {
    el: HtmlAudioElement,
    /// Keeps the `onerror` handler alive as long as the element
    _on_error: Closure<dyn FnMut()>,
}

impl Clip for HtmlClip {
    fn play(&self, on_settled: PlaybackCallback) {
        match self.el.play() {
            Ok(promise) => spawn_local(async move {
                let result = JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| AudioError::PlaybackRejected(js_reason(&e)));
                on_settled(result);
            }),
            Err(e) => on_settled(Err(AudioError::PlaybackRejected(js_reason(&e)))),
        }
    }

    fn pause(&self) {
        let _ = self.el.pause();
    }

    fn rewind(&self) {
        self.el.set_current_time(0.0);
    }

    fn set_volume(&self, volume: f32) {
        self.el.set_volume(f64::from(volume));
    }

    fn set_looping(&self, looping: bool) {
        self.el.set_loop(looping);
    }
}

/// Audio backend for the browser
pub struct WebAudioBackend {
    /// Shared context for tones (may be missing outside a secure context)
    ctx: Option<AudioContext>,
}

impl Default for WebAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioBackend {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - fallback tones disabled");
        }
        Self { ctx }
    }
}

impl AudioBackend for WebAudioBackend {
    type Clip = HtmlClip;

    fn load_clip(&self, path: &str, on_error: LoadErrorCallback) -> Result<HtmlClip, AudioError> {
        let el = HtmlAudioElement::new_with_src(path).map_err(|e| AudioError::AssetLoad {
            path: path.to_string(),
            reason: js_reason(&e),
        })?;

        let owned_path = path.to_string();
        let mut on_error = Some(on_error);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(report) = on_error.take() {
                report(AudioError::AssetLoad {
                    path: owned_path.clone(),
                    reason: "media error".into(),
                });
            }
        });
        el.set_onerror(Some(closure.as_ref().unchecked_ref()));
        el.load();

        Ok(HtmlClip {
            el,
            _on_error: closure,
        })
    }

    fn play_tone(&self, tone: &SyntheticTone) -> Result<(), AudioError> {
        let Some(ctx) = &self.ctx else {
            return Err(AudioError::Unavailable("no AudioContext".into()));
        };
        let js = |e: JsValue| AudioError::PlaybackRejected(js_reason(&e));

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let osc = ctx.create_oscillator().map_err(js)?;
        let gain = ctx.create_gain().map_err(js)?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(tone.frequency);
        gain.gain().set_value(tone.gain);
        osc.connect_with_audio_node(&gain).map_err(js)?;
        gain.connect_with_audio_node(&ctx.destination()).map_err(js)?;

        let t = ctx.current_time();
        osc.start().map_err(js)?;
        osc.stop_with_when(t + tone.duration).map_err(js)?;
        Ok(())
    }
}
