//! Render sink contract
//!
//! The simulation never draws. Once per presented frame it hands a read-only
//! `FrameSnapshot` to a `RenderSink`, which also carries the events since the
//! previous frame for audio and the theme/mute flags.

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState};

/// Axis-aligned rectangle in view pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lives: u8,
}

/// Everything a sink needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub view_width: f32,
    pub view_height: f32,
    pub ship: RectView,
    pub projectiles: Vec<RectView>,
    pub hostiles: Vec<RectView>,
    pub hud: Hud,
    pub muted: bool,
    pub dark_mode: bool,
    /// Events since the previous snapshot, oldest first
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, settings: &Settings, events: Vec<GameEvent>) -> Self {
        Self {
            phase: state.phase,
            view_width: state.tuning.view_width,
            view_height: state.tuning.view_height,
            ship: RectView {
                x: state.ship.pos.x,
                y: state.ship.pos.y,
                w: state.ship.size.x,
                h: state.ship.size.y,
            },
            projectiles: state
                .entities
                .projectiles
                .iter()
                .map(|p| RectView {
                    x: p.pos.x,
                    y: p.pos.y,
                    w: p.size.x,
                    h: p.size.y,
                })
                .collect(),
            hostiles: state
                .entities
                .hostiles
                .iter()
                .map(|h| RectView {
                    x: h.pos.x,
                    y: h.pos.y,
                    w: h.size,
                    h: h.size,
                })
                .collect(),
            hud: Hud {
                score: state.score,
                high_score: state.display_high_score(),
                level: state.level,
                lives: state.lives,
            },
            muted: settings.muted,
            dark_mode: settings.dark_mode,
            events,
        }
    }
}

/// Consumer of frame snapshots (canvas, terminal log, test recorder)
pub trait RenderSink {
    fn present(&mut self, frame: &FrameSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HostileSpec;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(1, Tuning::default(), 500);
        state.start();
        state.score = 620;
        state.level = 4;
        state.entities.spawn_hostile(&HostileSpec {
            x: 10.0,
            size: 25.0,
            speed: 2.0,
            points: 20,
        });
        let settings = Settings {
            muted: true,
            dark_mode: false,
        };

        let frame = FrameSnapshot::capture(&state, &settings, vec![GameEvent::Started]);
        assert_eq!(frame.phase, GamePhase::Playing);
        assert_eq!(frame.hostiles, vec![RectView { x: 10.0, y: -25.0, w: 25.0, h: 25.0 }]);
        assert!(frame.projectiles.is_empty());
        assert_eq!(frame.hud.high_score, 620);
        assert_eq!(frame.hud.level, 4);
        assert!(frame.muted);
        assert_eq!(frame.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1, Tuning::default(), 0);
        let frame = FrameSnapshot::capture(&state, &Settings::default(), Vec::new());
        let json = serde_json::to_string(&frame).expect("serialize");
        assert!(json.contains("\"phase\":\"Menu\""));
        assert!(json.contains("\"lives\":3"));
    }
}
