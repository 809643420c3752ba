//! Hostile spawning
//!
//! Each gap between spawns is drawn from `gap_bounds(level)`, a window around
//! `interval_ticks(level)` that shrinks with level and never dips below the
//! floor. Gaps, size, speed and position all come from the injected RNG so a
//! seed fully determines the spawn sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Rolled parameters for one hostile (the store assigns identity and y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileSpec {
    /// Left edge, within [0, view_width - size]
    pub x: f32,
    pub size: f32,
    pub speed: f32,
    pub points: u32,
}

/// Spawn timer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks elapsed since the last spawn (or since the session started)
    pub ticks_since_spawn: u32,
    /// Length of the current gap (0 until drawn)
    pub next_gap: u32,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.ticks_since_spawn = 0;
        self.next_gap = 0;
    }

    /// Ticks between spawns at `level`
    pub fn interval_ticks(level: u32, tuning: &Tuning) -> u32 {
        let steps = level.saturating_sub(1);
        tuning
            .spawn_interval_ticks
            .saturating_sub(tuning.spawn_interval_step.saturating_mul(steps))
            .max(tuning.spawn_interval_floor)
    }

    /// Inclusive range a gap at `level` is drawn from
    pub fn gap_bounds(level: u32, tuning: &Tuning) -> (u32, u32) {
        let interval = Self::interval_ticks(level, tuning);
        let lo = interval
            .saturating_sub(tuning.spawn_interval_jitter)
            .max(tuning.spawn_interval_floor);
        let hi = interval.saturating_add(tuning.spawn_interval_jitter).max(lo);
        (lo, hi)
    }

    /// Advance the timer one tick and roll a hostile if it is due
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<HostileSpec> {
        if self.next_gap == 0 {
            self.next_gap = Self::draw_gap(level, tuning, rng);
        }
        self.ticks_since_spawn = self.ticks_since_spawn.saturating_add(1);
        if self.ticks_since_spawn < self.next_gap {
            return None;
        }
        self.ticks_since_spawn = 0;
        let spec = roll_hostile(rng, level, tuning);
        self.next_gap = Self::draw_gap(level, tuning, rng);
        Some(spec)
    }

    fn draw_gap<R: Rng + ?Sized>(level: u32, tuning: &Tuning, rng: &mut R) -> u32 {
        let (lo, hi) = Self::gap_bounds(level, tuning);
        rng.random_range(lo..=hi)
    }
}

/// Roll size, speed and position for a hostile at `level`
pub fn roll_hostile<R: Rng + ?Sized>(rng: &mut R, level: u32, tuning: &Tuning) -> HostileSpec {
    let size = if tuning.hostile_max_size > tuning.hostile_min_size {
        rng.random_range(tuning.hostile_min_size..tuning.hostile_max_size)
    } else {
        tuning.hostile_min_size
    };

    let max_x = (tuning.view_width - size).max(0.0);
    let x = rng.random_range(0.0..=max_x);

    let jitter = if tuning.hostile_speed_jitter > 0.0 {
        rng.random_range(0.0..tuning.hostile_speed_jitter)
    } else {
        0.0
    };
    let level_bonus = tuning.hostile_speed_per_level * level.saturating_sub(1) as f32;
    let speed = tuning.hostile_base_speed + jitter + level_bonus;

    let points = if size < tuning.hostile_small_size {
        tuning.hostile_small_points
    } else {
        tuning.hostile_large_points
    };

    log::debug!("Spawning hostile: x={:.1} size={:.1} speed={:.2}", x, size, speed);

    HostileSpec {
        x,
        size,
        speed,
        points,
    }
}
