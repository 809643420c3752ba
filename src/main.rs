//! Space Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! Browser: canvas + requestAnimationFrame. Native: a headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

    use space_defender::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use space_defender::persistence::LocalStore;
    use space_defender::renderer::CanvasSink;
    use space_defender::{FrameDriver, FrameScheduler, InputAction, Session, Tuning};

    type Game = Session<LocalStore, CanvasSink>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        window: Window,
        callback: Closure<dyn FnMut(f64)>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            self.window
                .request_animation_frame(self.callback.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// An attached DOM listener, kept so it can be detached on teardown
    struct Listener {
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    /// Game instance holding all state
    struct App {
        game: Game,
        driver: FrameDriver<RafScheduler>,
        target: EventTarget,
        listeners: Vec<Listener>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.driver.on_frame(time, &mut self.game);
        }

        fn on_key_down(&mut self, event: &Event) {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(action) = self.game.key_down(&event.key(), event.repeat()) else {
                return;
            };
            event.prevent_default();
            if action == InputAction::StartGame {
                // Resumes the loop after game over; no-op while it is running
                self.driver.start();
            }
        }

        fn on_key_up(&mut self, event: &Event) {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                self.game.key_up(&event.key());
            }
        }

        fn on_blur(&mut self, _event: &Event) {
            self.game.release_keys();
        }

        fn attach_listeners(&self) -> Result<(), JsValue> {
            for listener in &self.listeners {
                self.target.add_event_listener_with_callback(
                    listener.kind,
                    listener.closure.as_ref().unchecked_ref(),
                )?;
            }
            Ok(())
        }

        fn teardown(&mut self) {
            self.driver.teardown();
            for listener in self.listeners.drain(..) {
                let _ = self.target.remove_event_listener_with_callback(
                    listener.kind,
                    listener.closure.as_ref().unchecked_ref(),
                );
            }
            self.game.release_keys();
        }
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    fn listener(weak: &Weak<RefCell<App>>, kind: &'static str, handler: fn(&mut App, &Event)) -> Listener {
        let weak = weak.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(app) = weak.upgrade() {
                handler(&mut app.borrow_mut(), &event);
            }
        });
        Listener { kind, closure }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Space Defender starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("missing #canvas element")?
            .dyn_into()?;

        let width = window
            .inner_width()?
            .as_f64()
            .map_or(VIEW_WIDTH, |w| w as f32);
        let height = window
            .inner_height()?
            .as_f64()
            .map_or(VIEW_HEIGHT, |h| h as f32);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let sink = CanvasSink::new(&canvas).ok_or("2D canvas context unavailable")?;
        let seed = js_sys::Date::now() as u64;
        let game = Session::new(seed, Tuning::for_viewport(width, height), LocalStore::new(), sink);
        log::info!("Game initialized with seed: {}", seed);

        let target: EventTarget = window.clone().into();
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let frame_weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let Some(app) = frame_weak.upgrade() {
                    app.borrow_mut().frame(time);
                }
            });

            RefCell::new(App {
                game,
                driver: FrameDriver::new(RafScheduler { window, callback }),
                target,
                listeners: vec![
                    listener(weak, "keydown", App::on_key_down),
                    listener(weak, "keyup", App::on_key_up),
                    listener(weak, "blur", App::on_blur),
                ],
            })
        });

        {
            let mut app = app.borrow_mut();
            app.attach_listeners()?;
            app.driver.start();
        }
        APP.with(|slot| *slot.borrow_mut() = Some(app));

        log::info!("Space Defender running!");
        Ok(())
    }

    /// Stop the loop and detach every listener. Safe to call repeatedly.
    pub fn teardown() {
        let app = APP.with(|slot| slot.borrow_mut().take());
        if let Some(app) = app {
            app.borrow_mut().teardown();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

/// Called by the host page when the game is removed
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_game::teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use space_defender::persistence::MemoryStore;
    use space_defender::renderer::{FrameSnapshot, Hud, RenderSink};
    use space_defender::sim::GameEvent;
    use space_defender::{FrameDriver, FrameScheduler, Session, Tuning};

    /// Simulated 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Hands out frame handles; the run loop plays the display
    #[derive(Default)]
    struct ImmediateScheduler {
        next: u64,
    }

    impl FrameScheduler for ImmediateScheduler {
        type Handle = u64;

        fn request_frame(&mut self) -> Option<u64> {
            self.next += 1;
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: u64) {
            log::trace!("Cancelled frame {}", handle);
        }
    }

    /// Logs HUD changes and notable events instead of drawing
    #[derive(Default)]
    struct LogSink {
        last_hud: Option<Hud>,
    }

    impl RenderSink for LogSink {
        fn present(&mut self, frame: &FrameSnapshot) {
            if self.last_hud != Some(frame.hud) {
                log::debug!(
                    "score {} level {} lives {} ({} hostiles, {} projectiles)",
                    frame.hud.score,
                    frame.hud.level,
                    frame.hud.lives,
                    frame.hostiles.len(),
                    frame.projectiles.len()
                );
                self.last_hud = Some(frame.hud);
            }
            for event in &frame.events {
                if let GameEvent::LevelUp { level } = event {
                    log::info!("Autopilot reached level {}", level);
                }
            }
        }
    }

    pub struct Summary {
        pub frames: u64,
        pub ticks: u64,
        pub score: u64,
        pub level: u32,
        pub lives: u8,
        pub high_score: u64,
    }

    /// Steer under the lowest hostile and keep the trigger busy
    fn autopilot(game: &mut Session<MemoryStore, LogSink>) {
        let state = game.state();
        let ship_x = state.ship.center_x();
        let target = state
            .entities
            .hostiles
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|h| h.pos.x + h.size / 2.0);

        let (left, right) = match target {
            Some(x) if x < ship_x - 4.0 => (true, false),
            Some(x) if x > ship_x + 4.0 => (false, true),
            _ => (false, false),
        };
        for (held, key) in [(left, "ArrowLeft"), (right, "ArrowRight")] {
            if held {
                game.key_down(key, false);
            } else {
                game.key_up(key);
            }
        }

        game.key_up(" ");
        game.key_down(" ", false);
    }

    pub fn run(seed: u64, tuning: Tuning, max_frames: u64) -> Summary {
        let mut game = Session::new(seed, tuning, MemoryStore::new(), LogSink::default());
        let mut driver = FrameDriver::new(ImmediateScheduler::default());

        game.key_down("Enter", false);
        driver.start();

        let mut now = 0.0;
        let mut frames = 0;
        while driver.is_scheduled() && frames < max_frames {
            autopilot(&mut game);
            now += FRAME_MS;
            driver.on_frame(now, &mut game);
            frames += 1;
        }
        driver.teardown();

        let state = game.state();
        Summary {
            frames,
            ticks: state.time_ticks,
            score: state.score,
            level: state.level,
            lives: state.lives,
            high_score: state.high_score,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_defender::Tuning;

    env_logger::init();
    log::info!("Space Defender (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => tuning,
            Ok(Err(e)) => {
                log::error!("Invalid tuning file {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::error!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let summary = headless::run(seed, tuning, 60 * 60 * 10);
    println!(
        "seed {}: score {} level {} lives {} (high score {}) after {} ticks / {} frames",
        seed,
        summary.score,
        summary.level,
        summary.lives,
        summary.high_score,
        summary.ticks,
        summary.frames
    );
}
