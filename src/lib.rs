//! Space Adventures - a Space-Invaders style arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game phases)
//! - `renderer`: Draw-list generation and the 2D canvas backend
//! - `platform`: Browser/native platform abstraction (input mapping)
//! - `settings`: Player preferences and key bindings, read from JSON

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{KeyBindings, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Interval between invader volleys (milliseconds)
    pub const INVADER_FIRE_INTERVAL_MS: i32 = 1000;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 96.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 30.0;
    /// Transparent margins around the ship sprite, excluded from its hitbox
    pub const PLAYER_HITBOX_INSET_X: f32 = 20.0;
    pub const PLAYER_HITBOX_INSET_TOP: f32 = 22.0;
    pub const PLAYER_HITBOX_INSET_BOTTOM: f32 = 34.0;
    /// Ship roll while strafing (radians)
    pub const PLAYER_TILT: f32 = 0.15;

    /// Invaders
    pub const INVADER_WIDTH: f32 = 40.0;
    pub const INVADER_HEIGHT: f32 = 29.6;
    pub const INVADER_START_SPEED: f32 = 1.0;
    /// Speed gained each time the grid steps down
    pub const INVADER_SPEED_STEP: f32 = 0.1;
    /// Grid layout pitch and origin
    pub const GRID_COL_SPACING: f32 = 50.0;
    pub const GRID_ROW_SPACING: f32 = 37.0;
    pub const GRID_ORIGIN_X: f32 = 20.0;
    pub const GRID_ORIGIN_Y: f32 = 120.0;
    /// Rows and columns are each rolled in 1..=GRID_MAX_DIM
    pub const GRID_MAX_DIM: u32 = 10;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 2.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = -10.0;
    pub const INVADER_PROJECTILE_SPEED: f32 = 10.0;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    /// Distance from the bottom edge to the obstacle row
    pub const OBSTACLE_BOTTOM_OFFSET: f32 = 250.0;
    /// Horizontal offset from center, as a fraction of arena width
    pub const OBSTACLE_SPREAD: f32 = 0.15;

    /// Particles
    pub const PARTICLE_RADIUS: f32 = 2.0;
    pub const PARTICLE_FADE: f32 = 0.008;
    pub const PARTICLE_SPREAD: f32 = 1.5;

    /// Stars
    pub const NUMBER_STARS: usize = 100;
    pub const STAR_MAX_RADIUS: f32 = 0.3;
    pub const STAR_MIN_SPEED: f32 = 0.1;
    pub const STAR_MAX_SPEED: f32 = 0.4;

    /// Scoring
    pub const INVADER_SCORE: u64 = 10;
}

/// Colors as 0xRRGGBB
pub mod colors {
    pub const WHITE: u32 = 0xFFFFFF;
    pub const CRIMSON: u32 = 0xDC143C;
    pub const INVADER_EXPLOSION: u32 = 0x941CFF;
    pub const SHIP_BLUE: u32 = 0x4D9BE6;
    pub const INVADER: u32 = 0x6EE76E;
    pub const PLAYER_SHOT: u32 = 0xFFFFFF;
    pub const INVADER_SHOT: u32 = 0xFFD166;
    pub const BACKGROUND: u32 = 0x000000;

    /// Format a color as a CSS hex string
    pub fn to_css(color: u32) -> String {
        format!("#{:06X}", color & 0xFFFFFF)
    }
}
