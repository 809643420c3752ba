//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Hit, resolve_collisions};
pub use entities::{EntityStore, Marks};
pub use spawner::{HostileSpec, Spawner, roll_hostile};
pub use state::{GameEvent, GamePhase, GameState, Hostile, Projectile, Ship, level_for_score};
pub use tick::{TickInput, tick};
