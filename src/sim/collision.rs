//! Collision detection and resolution
//!
//! One predicate everywhere: axis-aligned box overlap on both axes
//! (`rects_overlap`). Projectile hits are resolved before ship hits, each
//! projectile takes the first live hostile in store order, and anything
//! removed earlier in the pass is skipped for the rest of it.

use super::entities::{EntityStore, Marks};
use super::state::Ship;
use crate::rects_overlap;

/// A projectile that destroyed a hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile_id: u32,
    pub hostile_id: u32,
    pub points: u32,
}

/// Everything one resolution pass removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Projectile/hostile pairs, in resolution order
    pub hits: Vec<Hit>,
    /// Hostiles that rammed the ship, in store order
    pub rammed: Vec<u32>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.rammed.is_empty()
    }
}

/// Resolve all collisions for this tick and remove the entities involved
pub fn resolve_collisions(ship: &Ship, store: &mut EntityStore) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut marks = Marks::for_store(store);

    for (pi, projectile) in store.projectiles.iter().enumerate() {
        let target = store.hostiles.iter().enumerate().find(|(hi, hostile)| {
            !marks.hostile_removed(*hi)
                && rects_overlap(projectile.pos, projectile.size, hostile.pos, hostile.extent())
        });
        if let Some((hi, hostile)) = target {
            marks.remove_projectile(pi);
            marks.remove_hostile(hi);
            report.hits.push(Hit {
                projectile_id: projectile.id,
                hostile_id: hostile.id,
                points: hostile.points,
            });
        }
    }

    for (hi, hostile) in store.hostiles.iter().enumerate() {
        if !marks.hostile_removed(hi)
            && rects_overlap(ship.pos, ship.size, hostile.pos, hostile.extent())
        {
            marks.remove_hostile(hi);
            report.rammed.push(hostile.id);
        }
    }

    if !marks.is_clean() {
        store.compact(&marks);
    }
    report
}
