//! Cosmic Dash entry point
//!
//! Handles browser wiring and runs the game loop. The simulation itself
//! lives in the library; this shell measures wall-clock frame deltas, steps
//! the sim at a fixed timestep, and forwards events, the player transform,
//! and HUD updates to their collaborators.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use cosmic_dash::consts::*;
    use cosmic_dash::highscore;
    use cosmic_dash::input::{GameKey, InputTracker};
    use cosmic_dash::sim::{GameEvent, GamePhase, GameSession, TickInput, tick};

    // Bridge to the JS presentation layer. The page installs the hooks; a
    // page without them still runs the game with HUD only.
    #[wasm_bindgen(inline_js = "
        export function emit_fx(json) {
            if (window.cosmicDashFx) window.cosmicDashFx(JSON.parse(json));
        }
        export function set_player_transform(x, y, z, rx, ry, rz) {
            if (window.cosmicDashShip) window.cosmicDashShip(x, y, z, rx, ry, rz);
        }
        export function set_shield_visual(active, radius) {
            if (window.cosmicDashShield) window.cosmicDashShield(active, radius);
        }
    ")]
    extern "C" {
        fn emit_fx(json: &str);
        fn set_player_transform(x: f32, y: f32, z: f32, rx: f32, ry: f32, rz: f32);
        fn set_shield_visual(active: bool, radius: f32);
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        input: InputTracker,
        accumulator: f32,
        last_time: f64,
        start_pending: bool,
        restart_pending: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let mut session = GameSession::new(seed);
            session.high_score = highscore::load();
            Self {
                session,
                input: InputTracker::new(),
                accumulator: 0.0,
                last_time: 0.0,
                start_pending: false,
                restart_pending: false,
            }
        }

        /// Run fixed-timestep simulation steps for one animation frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            // Leave one-shot commands queued until a substep actually runs
            if self.accumulator < SIM_DT {
                return;
            }

            let mut input = TickInput {
                movement: self.input.movement(),
                roll: self.input.take_roll(),
                pause: self.input.take_pause(),
                start: std::mem::take(&mut self.start_pending),
                restart: std::mem::take(&mut self.restart_pending),
            };

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot commands only apply to the first substep
                input.roll = None;
                input.pause = false;
                input.start = false;
                input.restart = false;
            }
        }

        /// Drain events to the presentation layer and push the ship transform
        fn sync_presentation(&mut self) {
            for event in self.session.drain_events() {
                if let GameEvent::NewHighScore { value } = event {
                    highscore::save(value);
                }
                if let Ok(json) = serde_json::to_string(&event) {
                    emit_fx(&json);
                }
            }

            let player = &self.session.player;
            set_player_transform(
                player.pos.x,
                player.pos.y,
                player.pos.z,
                player.rotation.x,
                player.rotation.y,
                player.rotation.z,
            );
            // Shield sphere wraps the hull with 20% padding
            set_shield_visual(player.shield_active(), player.bounding_radius * 1.2);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self, document: &Document) {
            let score = self.session.score.floor() as u32;
            set_text(document, "score", &format!("Score: {score}"));
            set_text(
                document,
                "high-score",
                &format!("High Score: {}", self.session.high_score),
            );

            let phase = self.session.phase;
            set_hidden(document, "instructions", phase != GamePhase::Idle);
            set_hidden(document, "pause-menu", phase != GamePhase::Paused);
            set_hidden(document, "game-over", phase != GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                set_text(document, "final-score", &format!("Final Score: {score}"));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    /// Presentation layer reports the measured ship bounding radius once its
    /// model is loaded. Non-positive values are ignored.
    #[wasm_bindgen]
    pub fn set_player_bounding_radius(radius: f32) {
        if radius <= 0.0 {
            return;
        }
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                game.borrow_mut().session.player.bounding_radius = radius;
                log::info!("player bounding radius set to {radius}");
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Cosmic Dash starting...");

        let window = web_sys::window().expect("no window");
        window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        log::info!("session seeded with {seed}");

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Cosmic Dash running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(key) = GameKey::from_dom_key(&event.key()) {
                    game.borrow_mut().input.key_down(key, event.time_stamp());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = GameKey::from_dom_key(&event.key()) {
                    game.borrow_mut().input.key_up(key, event.time_stamp());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start_pending = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart_pending = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase == GamePhase::Running {
                        g.input.clear();
                        g.input.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); also drops any stuck held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.clear();
                if g.session.phase == GamePhase::Running {
                    g.input.request_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.sync_presentation();
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Dash (native) starting...");
    log::info!("The browser shell is the playable build - serve the wasm target instead");

    // Quick deterministic smoke run
    println!("\nRunning simulation smoke test...");
    smoke_test();
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test() {
    use cosmic_dash::consts::SIM_DT;
    use cosmic_dash::sim::{GamePhase, GameSession, TickInput, tick};

    let mut session = GameSession::new(0xC0FFEE);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut session, &start, SIM_DT);
    assert_eq!(session.phase, GamePhase::Running);

    for _ in 0..1200 {
        tick(&mut session, &TickInput::default(), SIM_DT);
        if session.phase != GamePhase::Running {
            break;
        }
        let expected = session.base_speed + (session.score / 1000.0) * 0.1;
        assert_eq!(session.game_speed, expected);
    }
    println!("✓ Simulation smoke test passed (score {:.0})", session.score);
}
