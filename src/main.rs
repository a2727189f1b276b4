//! Space Adventures entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

    use space_adventures::consts::*;
    use space_adventures::platform::KeyState;
    use space_adventures::renderer::{CanvasRenderer, build_frame};
    use space_adventures::sim::{self, GameEvent, GameState};
    use space_adventures::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        keys: KeyState,
        renderer: CanvasRenderer,
        accumulator: f32,
        last_time: f64,
        /// Invader fire timer, started by the Play button
        fire_interval: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.snapshot();
                sim::tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog rather than fast-forwarding
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Dispatch sound triggers and lifecycle events
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::PlayerExploded => show_game_over(document),
                    GameEvent::NextLevel => log::info!("Level {}", self.state.data.level),
                    GameEvent::InvaderHit | GameEvent::PlayerShot => {
                        log::debug!("sound: {:?}", event);
                    }
                }
            }
        }

        fn render(&self) {
            let commands = build_frame(&self.state, &self.settings);
            self.renderer.render(&commands);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let data = &self.state.data;
            set_text(document, ".score-ui .score > span", &data.score.to_string());
            set_text(document, ".score-ui .level > span", &data.level.to_string());
            set_text(document, ".score-ui .high > span", &data.high.to_string());
            if self.settings.show_fps {
                set_text(document, ".score-ui .fps > span", &self.fps.to_string());
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_display(el: &Element, value: &str) {
        if let Ok(el) = el.clone().dyn_into::<HtmlElement>() {
            let _ = el.style().set_property("display", value);
        }
    }

    fn show_game_over(document: &Document) {
        if let Some(el) = document.query_selector(".game-over").ok().flatten() {
            set_display(&el, "flex");
            let _ = el.class_list().add_1("zoom-animation");
        }
    }

    fn hide_game_over(document: &Document) {
        if let Some(el) = document.query_selector(".game-over").ok().flatten() {
            set_display(&el, "none");
            let _ = el.class_list().remove_1("zoom-animation");
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Space Adventures starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or("no canvas")?
            .dyn_into()?;

        // Canvas fills the viewport
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let settings = Settings::load(canvas.get_attribute("data-settings").as_deref());

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed, width as f32, height as f32);
        state.configure(settings.star_count(), settings.max_particles());

        log::info!("Game initialized with seed: {}", seed);

        hide_game_over(&document);

        let game = Rc::new(RefCell::new(Game {
            state,
            keys: KeyState::new(settings.keys.clone()),
            settings,
            renderer: CanvasRenderer::new(&canvas)?,
            accumulator: 0.0,
            last_time: 0.0,
            fire_interval: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(game.clone())?;
        setup_play_button(&document, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Space Adventures running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_down(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keys held while the window loses focus never get a keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_play_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.query_selector(".button-play")? else {
            log::warn!("Play button missing");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let Some(window) = web_sys::window() else { return };
            let Some(document) = window.document() else { return };

            if !sim::start(&mut game.borrow_mut().state) {
                return;
            }

            if let Some(el) = document.query_selector(".start-screen").ok().flatten() {
                el.remove();
            }
            if let Some(el) = document.query_selector(".score-ui").ok().flatten() {
                set_display(&el, "block");
            }

            start_fire_timer(&window, game.clone());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Invaders fire on a fixed wall-clock interval, independent of frames
    fn start_fire_timer(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        if game.borrow().fire_interval.is_some() {
            return;
        }

        let timer_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            sim::fire_invader_shot(&mut timer_game.borrow_mut().state);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            INVADER_FIRE_INTERVAL_MS,
        ) {
            Ok(handle) => game.borrow_mut().fire_interval = Some(handle),
            Err(e) => log::error!("Failed to start invader fire timer: {:?}", e),
        }
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.query_selector(".button-restart")? else {
            log::warn!("Restart button missing");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if sim::restart(&mut game.borrow_mut().state) {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    hide_game_over(&document);
                }
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.handle_events(&document);
            g.render();
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Adventures (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    demo::run();
}

/// Headless demo session with a scripted pilot
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use space_adventures::consts::{INVADER_FIRE_INTERVAL_MS, SIM_DT};
    use space_adventures::sim::{self, GamePhase, GameState, TickInput};
    use space_adventures::Settings;

    /// Environment variable holding settings JSON
    const SETTINGS_ENV: &str = "SPACE_ADVENTURES_SETTINGS";

    /// Ten simulated minutes at most
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let source = std::env::var(SETTINGS_ENV).ok();
        let settings = Settings::load(source.as_deref());

        let mut state = GameState::new(seed, 1280.0, 720.0);
        state.configure(settings.star_count(), settings.max_particles());
        sim::start(&mut state);

        let fire_every = ((INVADER_FIRE_INTERVAL_MS as f32 / 1000.0) / SIM_DT).round() as u64;

        while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
            if state.time_ticks % fire_every == 0 {
                sim::fire_invader_shot(&mut state);
            }
            let input = pilot(&state);
            sim::tick(&mut state, &input);
            state.drain_events();
        }

        let secs = state.time_ticks as f32 * SIM_DT;
        log::info!(
            "Demo finished after {:.1}s: score {}, level {}",
            secs,
            state.data.score,
            state.data.level
        );
    }

    /// Chase the lowest invader and keep tapping fire
    fn pilot(state: &GameState) -> TickInput {
        let target = state
            .grid
            .invaders
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|inv| inv.center().x);

        let ship_x = state.player.center().x;
        let (left, right) = match target {
            Some(x) if x < ship_x - 4.0 => (true, false),
            Some(x) if x > ship_x + 4.0 => (false, true),
            _ => (false, false),
        };

        TickInput {
            left,
            right,
            fire: state.time_ticks % 2 == 0,
        }
    }
}
