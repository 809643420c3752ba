//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! motion, firing, spawning, collisions, then state updates.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::motion::{step_hostiles, step_projectiles, step_ship};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire pressed since the previous snapshot
    pub fire: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1 (both held cancel out)
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Menu and game over are inert
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);

    // Motion
    step_ship(&mut state.ship, input.direction(), state.tuning.ship_max_x());
    step_projectiles(&mut state.entities.projectiles);
    let escaped = step_hostiles(&mut state.entities.hostiles, state.tuning.view_height);
    if escaped > 0 {
        log::trace!("{} hostile(s) left the screen", escaped);
    }

    // Fire from the ship's nose
    if input.fire && state.fire_cooldown == 0 {
        let tuning = &state.tuning;
        let size = Vec2::new(tuning.projectile_width, tuning.projectile_height);
        let pos = Vec2::new(state.ship.center_x() - size.x / 2.0, state.ship.pos.y - size.y);
        let projectile_id = state
            .entities
            .spawn_projectile(pos, size, tuning.projectile_speed);
        state.fire_cooldown = tuning.fire_cooldown_ticks;
        state.events.push(GameEvent::Fired { projectile_id });
    }

    // Spawn
    if let Some(spec) = state
        .spawner
        .update(state.level, &state.tuning, &mut state.rng)
    {
        state.entities.spawn_hostile(&spec);
    }

    // Collisions
    let report = resolve_collisions(&state.ship, &mut state.entities);
    if report.is_empty() {
        return;
    }
    for hit in &report.hits {
        state.events.push(GameEvent::HostileDestroyed {
            hostile_id: hit.hostile_id,
            points: hit.points,
        });
        state.award(hit.points);
    }
    for &hostile_id in &report.rammed {
        state.lose_life(hostile_id);
    }
}
