//! Session facade
//!
//! Owns the game state, input source, settings and the two outside
//! collaborators (storage and render sink). Hosts forward key events and let
//! a `FrameDriver` call `step`/`present`.

use crate::driver::Steppable;
use crate::highscores;
use crate::input::{InputAction, InputSource};
use crate::persistence::KeyValueStore;
use crate::renderer::{FrameSnapshot, RenderSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

pub struct Session<S: KeyValueStore, R: RenderSink> {
    state: GameState,
    input: InputSource,
    settings: Settings,
    store: S,
    sink: R,
    /// Events produced since the last present
    unpresented: Vec<GameEvent>,
}

impl<S: KeyValueStore, R: RenderSink> Session<S, R> {
    /// New session in the menu, with high score and settings read from `store`
    pub fn new(seed: u64, tuning: Tuning, store: S, sink: R) -> Self {
        let high_score = highscores::load(&store);
        let settings = Settings::load(&store);
        Self {
            state: GameState::new(seed, tuning, high_score),
            input: InputSource::new(),
            settings,
            store,
            sink,
            unpresented: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Handle a key press. Start and setting toggles take effect immediately;
    /// movement and fire are picked up by the next tick.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<InputAction> {
        let action = self.input.key_down(key, repeat)?;
        match action {
            InputAction::StartGame => {
                if !repeat {
                    self.start_game();
                }
            }
            InputAction::ToggleMute if !repeat => {
                self.settings.toggle_muted();
                self.settings.save(&mut self.store);
            }
            InputAction::ToggleDarkMode if !repeat => {
                self.settings.toggle_dark_mode();
                self.settings.save(&mut self.store);
            }
            _ => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Forget held keys (window blur)
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    /// Start a session from the menu or after game over. Returns false while playing.
    pub fn start_game(&mut self) -> bool {
        // A fire press from the menu must not carry into the new session
        self.input.discard_fire();
        let started = self.state.start();
        if started {
            self.unpresented.append(&mut self.state.events);
        }
        started
    }

    /// Run one tick; persists the high score if the session ends in it
    pub fn update(&mut self) -> &[GameEvent] {
        let input = self.input.snapshot();
        tick(&mut self.state, &input);

        let ended = self
            .state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }));
        if ended {
            let best = highscores::record(&mut self.store, self.state.high_score);
            self.state.high_score = best;
        }

        self.unpresented.extend_from_slice(&self.state.events);
        &self.state.events
    }

    /// Snapshot for the render sink, draining pending events
    pub fn snapshot(&mut self) -> FrameSnapshot {
        let events = std::mem::take(&mut self.unpresented);
        FrameSnapshot::capture(&self.state, &self.settings, events)
    }
}

impl<S: KeyValueStore, R: RenderSink> Steppable for Session<S, R> {
    fn step(&mut self) {
        self.update();
    }

    fn present(&mut self) {
        let frame = self.snapshot();
        self.sink.present(&frame);
    }

    fn is_finished(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }
}
