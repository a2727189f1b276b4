//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use grid::{Direction, Grid};
pub use state::{
    GameData, GameEvent, GamePhase, GameState, Invader, MAX_PARTICLES, Obstacle, Owner, Particle,
    Player, Projectile, Star,
};
pub use tick::{TickInput, fire_invader_shot, restart, start, tick};
