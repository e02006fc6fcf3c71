//! Target Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use target_rush::platform::canvas::CanvasPainter;
    use target_rush::platform::dom_hud::DomHud;
    use target_rush::platform::web_audio::WebAudioBackend;
    use target_rush::sim::Bounds;
    use target_rush::{Game, Settings};

    type WebGame = Game<WebAudioBackend, DomHud>;

    /// Game plus the surface it draws on
    struct App {
        game: WebGame,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        /// Pointer position in canvas coordinates
        fn canvas_pos(&self, event: &MouseEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                (f64::from(event.client_x()) - rect.left()) as f32,
                (f64::from(event.client_y()) - rect.top()) as f32,
            )
        }

        fn tick(&mut self) {
            let bounds = canvas_bounds(&self.canvas);
            if bounds != self.game.state.bounds {
                self.game.resize(bounds);
            }
            self.game.frame();
            self.game.render(&mut CanvasPainter::new(&self.ctx));
        }
    }

    fn canvas_bounds(canvas: &HtmlCanvasElement) -> Bounds {
        Bounds::new(canvas.width() as f32, canvas.height() as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Target Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            &settings,
            canvas_bounds(&canvas),
            WebAudioBackend::new(),
            DomHud::new(window.clone(), document.clone()),
            seed,
        );
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App { game, canvas, ctx }));

        setup_input_handlers(&app)?;
        setup_buttons(&document, &app)?;

        request_animation_frame(app);

        log::info!("Target Rush running!");
        Ok(())
    }

    fn setup_input_handlers(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let canvas = app.borrow().canvas.clone();

        // Crosshair follows the pointer
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.canvas_pos(&event);
                a.game.pointer_moved(pos);
            });
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Shots
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.canvas_pos(&event);
                a.game.click(pos);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // S toggles sound
        {
            let app = app.clone();
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("no document")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key().eq_ignore_ascii_case("s") {
                    app.borrow_mut().game.toggle_mute();
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &web_sys::Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("newGameBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.new_game();
                log::info!("New game started");
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("soundButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.toggle_mute();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().tick();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Target Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Autopilot seed: {}", seed);

    let summary = autopilot::run(seed);
    log::info!(
        "Autopilot finished: score {}, hits {}, misses {}, accuracy {}%",
        summary.score,
        summary.hits,
        summary.misses,
        summary.accuracy
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Plays a headless game until it ends: mostly aimed shots, some wild ones
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use target_rush::platform::headless::{LogHud, SilentBackend};
    use target_rush::sim::{Bounds, Summary};
    use target_rush::{Game, Settings};

    const SHOT_EVERY: u32 = 20;
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    const MISS_CHANCE: f64 = 0.15;

    pub fn run(seed: u64) -> Summary {
        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut game = Game::new(
            &Settings::load(),
            Bounds::new(800.0, 600.0),
            SilentBackend,
            LogHud::default(),
            seed,
        );

        for frame in 1..=MAX_FRAMES {
            game.frame();
            if frame % SHOT_EVERY != 0 {
                continue;
            }

            let aim = if rng.random_bool(MISS_CHANCE) {
                Vec2::new(1.0, 1.0)
            } else {
                match game.state.targets.first() {
                    Some(t) => t.pos,
                    None => continue,
                }
            };
            game.pointer_moved(aim);
            game.click(aim);

            if !game.state.is_active() {
                break;
            }
        }

        game.state.summary()
    }
}
