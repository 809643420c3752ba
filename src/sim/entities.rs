//! Entity store for projectiles and hostiles
//!
//! Plain index-addressed vectors. Removal during a pass is mark-then-compact:
//! the pass flags entities in `Marks`, skips anything already flagged, and
//! `EntityStore::compact` drops them afterwards in one sweep that preserves
//! the order of survivors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::HostileSpec;
use super::state::{Hostile, Projectile};

/// Active projectiles and hostiles (each kept in spawn order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub projectiles: Vec<Projectile>,
    pub hostiles: Vec<Hostile>,
    /// Last identity handed out (0 is never used)
    last_id: u32,
}

impl EntityStore {
    /// Allocate a new entity ID
    fn next_id(&mut self) -> u32 {
        self.last_id = self.last_id.wrapping_add(1).max(1);
        self.last_id
    }

    /// Add a projectile and return its ID
    pub fn spawn_projectile(&mut self, pos: Vec2, size: Vec2, speed: f32) -> u32 {
        let id = self.next_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            size,
            speed,
        });
        id
    }

    /// Add a hostile just above the top edge and return its ID
    pub fn spawn_hostile(&mut self, spec: &HostileSpec) -> u32 {
        let id = self.next_id();
        self.hostiles.push(Hostile {
            id,
            pos: Vec2::new(spec.x, -spec.size),
            size: spec.size,
            speed: spec.speed,
            points: spec.points,
        });
        id
    }

    /// Remove every entity. IDs keep counting up so they stay unique per store.
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.hostiles.is_empty()
    }

    /// Drop every entity flagged in `marks`
    pub fn compact(&mut self, marks: &Marks) {
        retain_unmarked(&mut self.projectiles, &marks.projectiles);
        retain_unmarked(&mut self.hostiles, &marks.hostiles);
    }
}

/// Per-pass removal flags, indexed like the store's vectors
#[derive(Debug, Clone, Default)]
pub struct Marks {
    projectiles: Vec<bool>,
    hostiles: Vec<bool>,
}

impl Marks {
    pub fn for_store(store: &EntityStore) -> Self {
        Self {
            projectiles: vec![false; store.projectiles.len()],
            hostiles: vec![false; store.hostiles.len()],
        }
    }

    pub fn hostile_removed(&self, index: usize) -> bool {
        self.hostiles.get(index).copied().unwrap_or(true)
    }

    pub fn remove_projectile(&mut self, index: usize) {
        if let Some(mark) = self.projectiles.get_mut(index) {
            *mark = true;
        }
    }

    pub fn remove_hostile(&mut self, index: usize) {
        if let Some(mark) = self.hostiles.get_mut(index) {
            *mark = true;
        }
    }

    /// True if nothing was flagged
    pub fn is_clean(&self) -> bool {
        !self.projectiles.iter().chain(&self.hostiles).any(|&m| m)
    }
}

fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !marks.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(x: f32) -> HostileSpec {
        HostileSpec {
            x,
            size: 30.0,
            speed: 2.0,
            points: 10,
        }
    }

    #[test]
    fn test_ids_are_unique_across_clear() {
        let mut store = EntityStore::default();
        let a = store.spawn_hostile(&spec(0.0));
        let b = store.spawn_projectile(Vec2::ZERO, Vec2::ONE, 10.0);
        store.clear();
        let c = store.spawn_hostile(&spec(0.0));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert!(a > 0);
    }

    #[test]
    fn test_hostile_spawns_above_view() {
        let mut store = EntityStore::default();
        store.spawn_hostile(&spec(120.0));
        let hostile = &store.hostiles[0];
        assert_eq!(hostile.pos, Vec2::new(120.0, -30.0));
    }

    #[test]
    fn test_compact_keeps_survivor_order() {
        let mut store = EntityStore::default();
        let ids: Vec<u32> = (0..5).map(|i| store.spawn_hostile(&spec(i as f32))).collect();
        let mut marks = Marks::for_store(&store);
        marks.remove_hostile(1);
        marks.remove_hostile(3);
        assert!(!marks.is_clean());
        store.compact(&marks);

        let left: Vec<u32> = store.hostiles.iter().map(|h| h.id).collect();
        assert_eq!(left, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_out_of_range_marks_read_as_removed() {
        let marks = Marks::default();
        assert!(marks.hostile_removed(0));
        assert!(marks.is_clean());
    }
}
