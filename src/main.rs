//! Stack Jump entry point
//!
//! The web build drives the game from `requestAnimationFrame`; the native build
//! runs a headless autoplay session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use stack_jump::audio::AudioManager;
    use stack_jump::consts::*;
    use stack_jump::platform::LocalStore;
    use stack_jump::renderer::{RenderState, SceneOptions, build_scene};
    use stack_jump::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use stack_jump::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        high_score: HighScore,
        store: LocalStore,
        settings: Settings,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Last values pushed to the DOM
        shown_phase: Option<GamePhase>,
        shown_score: Option<u64>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = LocalStore::open();
            let high_score = HighScore::load(&store);
            let settings = Settings::load(&store);
            Self {
                state: GameState::new(seed, high_score.best),
                render_state: None,
                audio: AudioManager::new(&settings),
                high_score,
                store,
                settings,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown_phase: None,
                shown_score: None,
            }
        }

        /// Run one simulation tick and dispatch its side effects
        fn update(&mut self, time: f64) {
            tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.jump = false;

            for event in self.state.drain_events() {
                self.audio.play_event(&event);
                if let GameEvent::GameOver { score, .. } = event {
                    self.high_score.submit(score, &mut self.store);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let options = SceneOptions {
                particles: self.settings.particles,
            };
            let vertices = build_scene(&self.state, options);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if self.shown_score != Some(self.state.score) {
                set_text(document, "currentScore", &self.state.score.to_string());
                self.shown_score = Some(self.state.score);
            }

            if let Some(el) = document.get_element_by_id("fps") {
                set_hidden(&el, !self.settings.show_fps);
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                }
            }

            let phase = self.state.phase;
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            set_text(document, "highScore", &self.high_score.best.to_string());

            if let Some(el) = document.get_element_by_id("startScreen") {
                set_hidden(&el, phase != GamePhase::Preview);
            }

            if let Some(el) = document.get_element_by_id("gameOverScreen") {
                set_hidden(&el, phase != GamePhase::GameOver);
            }
            if phase == GamePhase::GameOver {
                set_text(document, "finalScore", &self.state.score.to_string());
            }
            if let Some(el) = document.get_element_by_id("newBest") {
                set_hidden(&el, !(phase == GamePhase::GameOver && self.state.new_best));
            }
        }

        /// Persist and apply changed preferences
        fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            change(&mut self.settings);
            self.settings.save(&mut self.store);
            self.audio.apply_settings(&self.settings);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: &web_sys::Element, hidden: bool) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Stack Jump starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = fit_canvas(&canvas);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, width, height).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::warn!("No graphics adapter - running without rendering"),
        }

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone())?;

        // Set up start/restart buttons
        setup_buttons(&document, game.clone())?;

        // Keep the canvas fitted to its container
        setup_resize(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Stack Jump running!");
        Ok(())
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Option<RenderState> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::warn!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| log::warn!("Failed to create device: {}", e))
            .ok()
    }

    /// Scale the canvas to the largest size that fits its container at the
    /// game's aspect ratio. Returns the backing size in physical pixels.
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let scale = canvas
            .parent_element()
            .map(|container| {
                let rect = container.get_bounding_client_rect();
                (rect.width() as f32 / CANVAS_WIDTH).min(rect.height() as f32 / CANVAS_HEIGHT)
            })
            .filter(|s| *s > 0.0)
            .unwrap_or(1.0);

        let css_w = CANVAS_WIDTH * scale;
        let css_h = CANVAS_HEIGHT * scale;
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", css_w));
        let _ = style.set_property("height", &format!("{}px", css_h));

        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()) as f32;
        let width = ((css_w * dpr) as u32).max(1);
        let height = ((css_h * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Mouse click - jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.jump = true;
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start - jump without the synthetic click or page scroll
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.jump = true;
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // No context menu on long press
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            canvas.add_event_listener_with_callback(
                "contextmenu",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        g.audio.resume();
                        g.input.jump = true;
                    }
                    "Enter" => {
                        g.audio.resume();
                        g.input.start = true;
                    }
                    "m" | "M" => {
                        g.update_settings(|s| s.muted = !s.muted);
                        log::info!("Muted: {}", g.settings.muted);
                    }
                    "f" | "F" => g.update_settings(|s| s.show_fps = !s.show_fps),
                    "p" | "P" => g.update_settings(|s| s.particles = !s.particles),
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["startButton", "restartButton"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.start = true;
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{Duration, Instant};

    use stack_jump::audio::AudioManager;
    use stack_jump::consts::FRAME_RATE;
    use stack_jump::platform::FileStore;
    use stack_jump::sim::{GameEvent, GameState, TickInput, tick};
    use stack_jump::{HighScore, Settings, Tuning};

    /// Where the native build keeps its high score and settings
    const SAVE_PATH: &str = "stack_jump_save.json";

    /// Command line options
    #[derive(Debug)]
    pub struct Options {
        pub seed: u64,
        pub tuning: Option<String>,
        pub ticks: u64,
        /// Sleep to hold the nominal frame rate
        pub paced: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seed: 0,
                tuning: None,
                // Five minutes of play
                ticks: FRAME_RATE as u64 * 300,
                paced: true,
            }
        }
    }

    impl Options {
        /// Parse `--seed N`, `--tuning PATH`, `--ticks N` and `--fast`
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut options = Self::default();
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
                match arg.as_str() {
                    "--seed" => {
                        options.seed = value()?.parse().map_err(|e| format!("--seed: {}", e))?
                    }
                    "--tuning" => options.tuning = Some(value()?),
                    "--fast" => options.paced = false,
                    "--ticks" => {
                        options.ticks = value()?.parse().map_err(|e| format!("--ticks: {}", e))?
                    }
                    other => return Err(format!("unknown argument: {}", other)),
                }
            }
            Ok(options)
        }
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {} - using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Play autoplay runs back to back until the tick budget is spent
    pub fn run(options: &Options) {
        let mut store = FileStore::open(SAVE_PATH);
        let mut high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let audio = AudioManager::new(&settings);
        let tuning = load_tuning(options.tuning.as_deref());

        let mut state = GameState::with_tuning(options.seed, high_score.best, tuning);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        log::info!(
            "Autoplay: seed {}, {} ticks, high score {}",
            options.seed,
            options.ticks,
            high_score.best
        );

        let frame = Duration::from_secs_f64(1.0 / FRAME_RATE as f64);
        let mut next_frame = Instant::now();

        let mut runs = 0u32;
        let mut best_run = 0u64;
        for t in 0..options.ticks {
            tick(&mut state, &input);

            for event in state.drain_events() {
                audio.play_event(&event);
                match event {
                    GameEvent::RunStarted => runs += 1,
                    GameEvent::GameOver { score, .. } => {
                        best_run = best_run.max(score);
                        high_score.submit(score, &mut store);
                    }
                    _ => {}
                }
            }

            if t > 0 && t % (FRAME_RATE as u64 * 10) == 0 {
                log::info!(
                    "t={}s run {} score {} platforms {}",
                    t / FRAME_RATE as u64,
                    runs,
                    state.score,
                    state.platforms.len()
                );
            }

            if options.paced {
                next_frame += frame;
                if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
                    std::thread::sleep(wait);
                }
            }
        }

        // Count an unfinished run too
        best_run = best_run.max(state.score);
        high_score.submit(state.score, &mut store);

        println!(
            "{} runs, best this session {}, all-time best {}",
            runs, best_run, high_score.best
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_parse_defaults() {
            let options = Options::parse(Vec::new()).unwrap();
            assert_eq!(options.seed, 0);
            assert!(options.tuning.is_none());
            assert_eq!(options.ticks, 18_000);
            assert!(options.paced);
        }

        #[test]
        fn test_parse_all_flags() {
            let options =
                Options::parse(args(&[
                    "--seed", "42", "--tuning", "t.json", "--ticks", "10", "--fast",
                ]))
                .unwrap();
            assert_eq!(options.seed, 42);
            assert_eq!(options.tuning.as_deref(), Some("t.json"));
            assert_eq!(options.ticks, 10);
            assert!(!options.paced);
        }

        #[test]
        fn test_parse_rejects_bad_input() {
            assert!(Options::parse(args(&["--seed"])).is_err());
            assert!(Options::parse(args(&["--seed", "abc"])).is_err());
            assert!(Options::parse(args(&["--turbo"])).is_err());
        }

        #[test]
        fn test_missing_tuning_file_uses_defaults() {
            assert_eq!(
                load_tuning(Some("/nonexistent/tuning.json")),
                Tuning::default()
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Stack Jump (native) starting...");
    log::info!("Native mode runs headless autoplay - run with `trunk serve` for the web version");

    match headless::Options::parse(std::env::args().skip(1)) {
        Ok(options) => headless::run(&options),
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: stack-jump [--seed N] [--tuning PATH] [--ticks N] [--fast]");
            std::process::exit(2);
        }
    }
}
