//! Per-tick motion integration
//!
//! Each entity moves independently of the others, so update order does not
//! matter. Anything that leaves the view is dropped in the same step.

use super::state::{Hostile, Projectile, Ship};

/// Move the ship by its speed in `direction` (-1, 0 or 1), clamped to [0, max_x]
pub fn step_ship(ship: &mut Ship, direction: f32, max_x: f32) {
    let direction = direction.clamp(-1.0, 1.0);
    ship.pos.x = (ship.pos.x + direction * ship.speed).clamp(0.0, max_x);
}

/// Move projectiles up; returns how many left through the top edge
pub fn step_projectiles(projectiles: &mut Vec<Projectile>) -> usize {
    let before = projectiles.len();
    projectiles.retain_mut(|p| {
        p.pos.y -= p.speed;
        p.pos.y + p.size.y > 0.0
    });
    before - projectiles.len()
}

/// Move hostiles down; returns how many left through the bottom edge
pub fn step_hostiles(hostiles: &mut Vec<Hostile>, view_height: f32) -> usize {
    let before = hostiles.len();
    hostiles.retain_mut(|h| {
        h.pos.y += h.speed;
        h.pos.y < view_height
    });
    before - hostiles.len()
}
