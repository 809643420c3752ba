//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; there is no
//! process-wide mutable state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::EntityStore;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start action
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; only a start action leaves this phase
    GameOver,
}

/// Something that happened during a tick, for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new session began
    Started,
    /// Ship fired a projectile
    Fired { projectile_id: u32 },
    /// A projectile destroyed a hostile
    HostileDestroyed { hostile_id: u32, points: u32 },
    /// A hostile rammed the ship
    ShipHit { hostile_id: u32, lives_left: u8 },
    /// Score crossed a level threshold
    LevelUp { level: u32 },
    /// Lives reached zero
    GameOver {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
}

impl Ship {
    /// Ship centered horizontally at its resting height
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.ship_max_x() / 2.0, tuning.ship_y()),
            size: Vec2::new(tuning.ship_width, tuning.ship_height),
            speed: tuning.ship_speed,
        }
    }

    /// Horizontal center of the ship
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick (upward)
    pub speed: f32,
}

/// A descending enemy/asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Side length (hostiles are square)
    pub size: f32,
    /// Pixels per tick (downward)
    pub speed: f32,
    /// Score awarded when shot down
    pub points: u32,
}

impl Hostile {
    pub fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// Level reached at `score`: 1 plus the number of thresholds already met
pub fn level_for_score(score: u64, thresholds: &[u64]) -> u32 {
    1 + thresholds.iter().filter(|&&t| score >= t).count() as u32
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner randomness
    pub rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Best score seen, including previous sessions
    pub high_score: u64,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub ship: Ship,
    pub entities: EntityStore,
    pub spawner: Spawner,
    /// Ticks until the ship may fire again
    pub fire_cooldown: u32,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the menu phase
    pub fn new(seed: u64, mut tuning: Tuning, high_score: u64) -> Self {
        tuning.sanitize();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            high_score,
            time_ticks: 0,
            ship: Ship::new(&tuning),
            entities: EntityStore::default(),
            spawner: Spawner::default(),
            fire_cooldown: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start a new session from `Menu` or `GameOver`
    ///
    /// Returns false (and changes nothing) while already playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 1;
        self.time_ticks = 0;
        self.ship = Ship::new(&self.tuning);
        self.entities.clear();
        self.spawner.reset();
        self.fire_cooldown = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);

        log::info!("Session started (seed {}, high score {})", self.seed, self.high_score);
        true
    }

    /// Add points and re-derive the level
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
        let level = level_for_score(self.score, &self.tuning.level_thresholds);
        if level > self.level {
            self.level = level;
            self.events.push(GameEvent::LevelUp { level });
            log::info!("Level {} reached at score {}", level, self.score);
        }
    }

    /// Take one life; ends the session the moment lives reach zero
    pub fn lose_life(&mut self, hostile_id: u32) {
        if self.phase != GamePhase::Playing || self.lives == 0 {
            return;
        }
        self.lives -= 1;
        self.events.push(GameEvent::ShipHit {
            hostile_id,
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.end();
        }
    }

    fn end(&mut self) {
        let new_high_score = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} level {} (high score {})",
            self.score,
            self.level,
            self.high_score
        );
    }

    /// High score to display (the running score once it passes the record)
    pub fn display_high_score(&self) -> u64 {
        self.high_score.max(self.score)
    }
}
