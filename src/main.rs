//! Gapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gapwing::Settings;
    use gapwing::assets::ImageStore;
    use gapwing::audio::AudioManager;
    use gapwing::consts::*;
    use gapwing::render::CanvasRenderer;
    use gapwing::scene::build_frame;
    use gapwing::sim::{SimState, Viewport, activate, advance};

    /// Game instance holding all state
    struct Game {
        state: SimState,
        store: ImageStore,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        /// Timestamp of the last accepted tick (ms)
        last_tick_ms: f64,
        /// Cleared on unmount; no further frame is scheduled once false
        running: Rc<Cell<bool>>,
        // FPS logging
        frames_in_window: u32,
        window_start_ms: f64,
    }

    impl Game {
        fn new(viewport: Viewport, seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: SimState::new(viewport, seed),
                store: ImageStore::preload(),
                renderer: None,
                audio,
                settings,
                last_tick_ms: 0.0,
                running: Rc::new(Cell::new(true)),
                frames_in_window: 0,
                window_start_ms: 0.0,
            }
        }

        /// One discrete activation from pointer, touch, or Space
        fn on_activate(&mut self) {
            // Browsers only allow audio after a user gesture
            self.audio.resume();
            for cue in activate(&mut self.state) {
                self.audio.play(cue);
            }
        }

        /// One display refresh. Skips the tick entirely when less than a
        /// target frame interval has elapsed, capping the simulation rate.
        fn frame(&mut self, time: f64) {
            if time - self.last_tick_ms < FRAME_TIME_MS {
                return;
            }

            let dt = if self.last_tick_ms > 0.0 {
                (((time - self.last_tick_ms) / FRAME_UNIT_MS as f64) as f32)
                    .min(MAX_FRAME_UNITS)
            } else {
                1.0
            };
            self.last_tick_ms = time;

            for cue in advance(&mut self.state, dt) {
                self.audio.play(cue);
            }

            if let Some(renderer) = &self.renderer {
                let mut sprites = build_frame(&self.state);
                for sprite in &mut sprites {
                    sprite.rotation_deg = self.settings.effective_rotation(sprite.rotation_deg);
                }
                renderer.draw(
                    &sprites,
                    &self.store,
                    self.state.viewport.w,
                    self.state.viewport.h,
                );
            }

            if self.settings.show_fps {
                self.frames_in_window += 1;
                if time - self.window_start_ms >= 1000.0 {
                    log::info!("fps: {}", self.frames_in_window);
                    self.frames_in_window = 0;
                    self.window_start_ms = time;
                }
            }
        }

        /// Flip the mute preference, apply it, and persist it
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Resize the canvas backing store and rederive pixel dimensions
        /// without resetting the simulation
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            self.state
                .resize(Viewport::new(width as f32, height as f32));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Viewport::new(1.0, 1.0), seed)));
        game.borrow_mut().resize(&canvas);
        game.borrow_mut().renderer = CanvasRenderer::new(&canvas);
        if game.borrow().renderer.is_none() {
            log::error!("Canvas 2d context unavailable");
        }

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_unmount_handler(game.clone());

        request_frame(game);

        log::info!("Gapwing running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().on_activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (prevent_default stops the synthesized mouse event)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().on_activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => game.borrow_mut().on_activate(),
                    "KeyM" => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop scheduling frames when the page goes away. An in-flight
    /// callback still runs to completion; it just never re-arms.
    fn setup_unmount_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            stop(&game);
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Cancel the loop; no further tick starts after this returns
    pub fn stop(game: &Rc<RefCell<Game>>) {
        game.borrow().running.set(false);
        log::info!("Game loop stopped");
    }

    fn request_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let running = game.borrow().running.clone();
        let closure = Closure::once(move |time: f64| {
            if !running.get() {
                return;
            }
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        if game.borrow().running.get() {
            request_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gapwing (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless smoke run: flap on a fixed cadence and report the outcome
    run_demo_simulation();
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo_simulation() {
    use gapwing::sim::{Mode, SimState, Viewport, activate, advance};

    let mut state = SimState::new(Viewport::new(800.0, 600.0), 42);
    activate(&mut state);

    let mut ticks = 0u32;
    while state.mode == Mode::Running && ticks < 3600 {
        if ticks % 18 == 0 {
            activate(&mut state);
        }
        advance(&mut state, 1.0);
        ticks += 1;
    }

    log::info!(
        "Demo run ended after {} ticks with score {}",
        ticks,
        state.score
    );
}
