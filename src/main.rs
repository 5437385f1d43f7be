//! Scarefly entry point
//!
//! Wires the DOM dialogs, input handlers, and the requestAnimationFrame loop
//! around the pure sim. The loop runs every frame; the sim's interval check
//! decides whether a step actually fires. On game over the loop stops
//! rescheduling itself before the terminal dialog is shown, so no tick can
//! land after the score is recorded.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlDialogElement, HtmlElement, HtmlInputElement, HtmlSelectElement};

    use scarefly::audio::{Cue, CueCache};
    use scarefly::sim::{GameEvent, GamePhase, GameSession, Surface, Tile, scare, tick};
    use scarefly::{RunConfig, ScoreLedger};

    /// Everything that outlives a single run
    struct App {
        session: GameSession,
        surface: Surface,
        cache: CueCache,
        ledger: ScoreLedger,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let mut surface = Surface::new();
            // Starting stretch of walkway; expansion takes over from here
            surface.append_range(0, 10, Tile::Concrete);
            Self {
                session: GameSession::new(RunConfig::default(), seed),
                surface,
                cache: CueCache::new(),
                ledger: ScoreLedger::load(),
            }
        }

        /// Play cues and surface messages for pending sim events; returns
        /// the final score when one of them ended the run
        fn dispatch_events(&mut self) -> Option<u32> {
            let mut final_score = None;
            for event in self.session.drain_events() {
                if let Some(cue) = Cue::from_event(&event) {
                    self.cache.play(cue);
                }
                match event {
                    GameEvent::ScoreAnnouncement { score } => {
                        render_message(&format!("Score: {score}"));
                    }
                    GameEvent::GameOver { score } => final_score = Some(score),
                    _ => {}
                }
            }
            final_score
        }
    }

    fn document() -> Document {
        web_sys::window().expect("no window").document().expect("no document")
    }

    /// Update the aria-live alert region
    fn render_message(msg: &str) {
        if let Some(el) = document().get_element_by_id("alerts") {
            el.set_text_content(Some(msg));
        }
    }

    fn dialog(id: &str) -> Option<HtmlDialogElement> {
        document().get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Scarefly starting...");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Initialized with seed: {}", seed);

        setup_start_dialog(app.clone());
        setup_scare_handlers(app.clone());
        setup_game_over_dialog(app.clone());
        setup_auto_pause(app.clone());

        if let Some(dlg) = dialog("start") {
            let _ = dlg.show_modal();
        }

        // The loop runs from boot; ticks are no-ops until a run starts
        request_animation_frame(app);

        log::info!("Scarefly running!");
    }

    fn setup_start_dialog(app: Rc<RefCell<App>>) {
        let Some(btn) = document().get_element_by_id("btn-start") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let document = document();
            let difficulty = document
                .get_element_by_id("difficulty-input")
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                .map(|el| el.value())
                .unwrap_or_default();
            let announce_enabled = document
                .get_element_by_id("announce-checkbox")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|el| el.checked())
                .unwrap_or(false);
            let interval = document
                .get_element_by_id("announce-interval-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|el| el.value())
                .unwrap_or_default();

            let config = RunConfig::from_inputs(&difficulty, announce_enabled, &interval);
            let seed = js_sys::Date::now() as u64;

            let mut a = app.borrow_mut();
            a.session = GameSession::new(config, seed);
            a.session.start_run(js_sys::Date::now());
            // First user gesture: unlock the audio context and confirm start
            a.cache.resume();
            a.cache.play(Cue::ScareSuccess);

            if let Some(dlg) = dialog("start") {
                dlg.close();
            }
            if let Some(area) = document
                .get_element_by_id("area")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = area.focus();
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_scare_handlers(app: Rc<RefCell<App>>) {
        // Click on the game area
        if let Some(area) = document().get_element_by_id("area") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                scare(&mut a.session);
                // A scare can't end the run; nothing terminal to handle
                let _ = a.dispatch_events();
            });
            let _ =
                area.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space/Enter anywhere
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if matches!(event.key().as_str(), " " | "Enter") {
                let mut a = app.borrow_mut();
                if a.session.phase == GamePhase::Running {
                    event.prevent_default();
                    scare(&mut a.session);
                    let _ = a.dispatch_events();
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_game_over_dialog(app: Rc<RefCell<App>>) {
        // Replay with identical settings
        if let Some(btn) = document().get_element_by_id("btn-replay") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                {
                    let mut a = app.borrow_mut();
                    if a.session.phase == GamePhase::Running {
                        return;
                    }
                    a.session.start_run(js_sys::Date::now());
                    a.cache.play(Cue::ScareSuccess);
                }
                if let Some(dlg) = dialog("game-over") {
                    dlg.close();
                }
                // The loop stopped at game over; re-enter it
                request_animation_frame(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tear down and reconfigure from scratch
        if let Some(btn) = document().get_element_by_id("btn-restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Freeze the stopwatch while the tab is hidden so a background tab
    /// doesn't come back to a wall of queued steps
    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let document_el = document();
        let doc_for_closure = document_el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            if a.session.phase != GamePhase::Running {
                return;
            }
            if doc_for_closure.visibility_state() == web_sys::VisibilityState::Hidden {
                a.session.timer.pause();
                log::info!("Paused (tab hidden)");
            } else {
                a.session.timer.resume();
                a.session.timer.restart(js_sys::Date::now());
                log::info!("Resumed (tab visible)");
            }
        });
        let _ = document_el
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let final_score = {
            let mut a = app.borrow_mut();
            let App {
                session, surface, ..
            } = &mut *a;
            tick(session, surface, js_sys::Date::now());
            a.dispatch_events()
        };

        match final_score {
            // Stop scheduling BEFORE any terminal UI work
            Some(score) => handle_game_over(&app, score),
            None => request_animation_frame(app),
        }
    }

    fn handle_game_over(app: &Rc<RefCell<App>>, score: u32) {
        let (difficulty, past_scores) = {
            let mut a = app.borrow_mut();
            a.ledger.append(score);
            a.ledger.save();
            (a.session.difficulty(), a.ledger.sorted_desc())
        };

        render_message("");

        let document = document();
        if let Some(content) = document.get_element_by_id("content") {
            content.set_text_content(Some(&format!(
                "Game over. You scared the fly away {} times on difficulty level {}.",
                score,
                difficulty.as_str()
            )));
        }
        if let Some(list) = document.get_element_by_id("past-scores") {
            let rendered = past_scores
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            list.set_text_content(Some(&format!("Best scores: {rendered}")));
        }
        if let Some(dlg) = dialog("game-over") {
            let _ = dlg.show_modal();
        }
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
    use scarefly::RunConfig;
    use scarefly::sim::{Difficulty, GamePhase, GameSession, Surface, tick};

    env_logger::init();
    log::info!("Scarefly (native) starting...");
    log::info!("The playable game is browser-only - run with `trunk serve`");

    // Headless demo run with a synthetic clock
    let config = RunConfig {
        difficulty: Difficulty::Medium,
        ..Default::default()
    };
    let mut session = GameSession::new(config, 0xF17);
    let mut surface = Surface::new();
    session.start_run(0.0);

    let mut now = 0.0;
    while session.phase == GamePhase::Running {
        now += session.player.move_interval_ms + 1.0;
        tick(&mut session, &mut surface, now);
    }
    println!(
        "Demo run: caught the fly at tile {} after {:.1}s",
        session.player.position,
        now / 1000.0
    );
}
