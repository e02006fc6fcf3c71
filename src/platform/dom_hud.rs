//! HUD backed by the page's DOM elements

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::game::{Hud, Stats};
use crate::sim::Summary;

const NOTIFICATION_MS: i32 = 1000;
const SOUND_WAVE_MS: i32 = 300;

pub struct DomHud {
    window: Window,
    document: Document,
    notification_timer: Option<i32>,
    wave_timer: Option<i32>,
}

impl DomHud {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            notification_timer: None,
            wave_timer: None,
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        match self.document.get_element_by_id(id) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::trace!("missing HUD element #{id}"),
        }
    }

    fn sound_wave(&self) -> Option<Element> {
        if let Ok(Some(el)) = self.document.query_selector(".sound-wave") {
            return Some(el);
        }
        let wrapper = self.document.query_selector(".game-wrapper").ok()??;
        let el = self.document.create_element("div").ok()?;
        el.set_class_name("sound-wave");
        wrapper.append_child(&el).ok()?;
        Some(el)
    }

    /// Remove `class` from `el` after `ms`, replacing any pending removal
    fn clear_class_later(&self, el: Element, class: &'static str, ms: i32, slot: Option<i32>) -> Option<i32> {
        if let Some(handle) = slot {
            self.window.clear_timeout_with_handle(handle);
        }
        let callback = Closure::once_into_js(move || {
            let _ = el.class_list().remove_1(class);
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
            .ok()
    }
}

impl Hud for DomHud {
    fn show_stats(&mut self, stats: &Stats) {
        self.set_text("score", &stats.score.to_string());
        self.set_text("hits", &stats.hits.to_string());
        self.set_text("misses", &stats.misses.to_string());
        self.set_text("targetsLeft", &"🎯".repeat(stats.targets_left));
    }

    fn notify(&mut self, text: &str, color: &str) {
        let Some(el) = self.document.get_element_by_id("notification") else {
            return;
        };
        el.set_text_content(Some(text));
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("background", color);
        }
        let _ = el.class_list().add_1("active");
        self.notification_timer =
            self.clear_class_later(el, "active", NOTIFICATION_MS, self.notification_timer);
    }

    fn show_game_over(&mut self, summary: &Summary) {
        self.set_text("finalScore", &summary.score.to_string());
        self.set_text("finalHits", &summary.hits.to_string());
        self.set_text("finalMisses", &summary.misses.to_string());
        self.set_text("finalAccuracy", &format!("{}%", summary.accuracy));
        if let Some(el) = self.document.get_element_by_id("gameOverlay") {
            let _ = el.class_list().add_1("active");
        }
    }

    fn hide_game_over(&mut self) {
        if let Some(el) = self.document.get_element_by_id("gameOverlay") {
            let _ = el.class_list().remove_1("active");
        }
    }

    fn show_mute(&mut self, muted: bool) {
        if let Some(el) = self.document.get_element_by_id("soundToggle") {
            el.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
            let _ = el.class_list().toggle_with_force("muted", muted);
        }
        self.set_text(
            "soundButton",
            if muted { "🔇 SOUND OFF" } else { "🔊 SOUND ON" },
        );
    }

    fn pulse_sound_wave(&mut self) {
        let Some(el) = self.sound_wave() else {
            return;
        };
        let _ = el.class_list().add_1("active");
        self.wave_timer = self.clear_class_later(el, "active", SOUND_WAVE_MS, self.wave_timer);
    }
}
