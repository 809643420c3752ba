//! Space Defender - A browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `input`: Key state tracking and per-tick input snapshots
//! - `driver`: Fixed timestep frame scheduling with cancellable frames
//! - `session`: Ties input, simulation, storage and snapshots together
//! - `renderer`: Render sink contract (and the canvas sink on the web)
//! - `audio`: Event-to-sound mapping (Web Audio playback on the web)
//! - `persistence`: Key/value storage (LocalStorage on web, memory elsewhere)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod driver;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, FrameScheduler, Steppable};
pub use input::{InputAction, InputSource};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 ms, ~33 Hz)
    pub const SIM_DT: f32 = 0.030;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed into the accumulator (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Default viewport dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 40.0;
    pub const SHIP_HEIGHT: f32 = 40.0;
    /// Gap between the ship's bottom edge and the bottom of the view
    pub const SHIP_BOTTOM_MARGIN: f32 = 20.0;
    /// Pixels per tick
    pub const SHIP_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 16.0;
    /// Pixels per tick (upward)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Slowest upward projectile speed a tuning file may set
    pub const MIN_PROJECTILE_SPEED: f32 = 1.0;
    /// 300 ms at the fixed timestep
    pub const FIRE_COOLDOWN_TICKS: u32 = 10;

    /// Hostile size range (min inclusive, max exclusive)
    pub const HOSTILE_MIN_SIZE: f32 = 20.0;
    pub const HOSTILE_MAX_SIZE: f32 = 40.0;
    /// Base descent speed (pixels per tick)
    pub const HOSTILE_BASE_SPEED: f32 = 2.0;
    /// Extra random descent speed added on top of the base
    pub const HOSTILE_SPEED_JITTER: f32 = 1.0;
    /// Descent speed gained per level above 1
    pub const HOSTILE_SPEED_PER_LEVEL: f32 = 0.5;
    /// Hostiles smaller than this are worth more
    pub const HOSTILE_SMALL_SIZE: f32 = 30.0;
    pub const HOSTILE_SMALL_POINTS: u32 = 20;
    pub const HOSTILE_LARGE_POINTS: u32 = 10;

    /// Spawn interval (ticks) at level 1, per-level reduction, and floor
    pub const SPAWN_INTERVAL_TICKS: u32 = 50;
    pub const SPAWN_INTERVAL_STEP: u32 = 8;
    pub const SPAWN_INTERVAL_FLOOR: u32 = 15;
    /// Random spread (ticks) either side of the interval for each gap
    pub const SPAWN_INTERVAL_JITTER: u32 = 20;

    /// Score needed to reach levels 2, 3, 4, 5
    pub const LEVEL_THRESHOLDS: [u64; 4] = [150, 300, 500, 800];
}

/// Axis-aligned rectangle overlap (strict, touching edges do not overlap)
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
