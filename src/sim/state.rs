//! Game state and core simulation types
//!
//! Screen-space coordinates: origin top-left, y grows downward. Positions are
//! the top-left corner of each entity's bounding box.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::grid::Grid;
use crate::colors;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the Play button
    Start,
    /// Active gameplay
    Playing,
    /// Ship destroyed; the arena keeps animating behind the restart screen
    GameOver,
}

/// Side that fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Invader,
}

/// Fire-and-forget notifications for the host (sound triggers, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A player shot destroyed an invader
    InvaderHit,
    /// The ship was destroyed
    PlayerExploded,
    /// The ship fired
    PlayerShot,
    /// A wave was cleared and a new grid spawned
    NextLevel,
}

/// Score, level and session high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub score: u64,
    pub level: u32,
    pub high: u64,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            high: 0,
        }
    }
}

impl GameData {
    /// Start a session with a previously recorded high score
    pub fn with_high(high: u64) -> Self {
        Self {
            high,
            ..Self::default()
        }
    }

    /// Add points; the high score follows once it is surpassed
    pub fn increment_score(&mut self, value: u64) {
        self.score += value;
        if self.score > self.high {
            self.high = self.score;
        }
    }

    pub fn increment_level(&mut self) {
        self.level += 1;
    }

    /// Reset score and level for a new run (high score is kept)
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub alive: bool,
    /// Current roll (radians), for rendering only
    pub tilt: f32,
}

impl Player {
    /// Spawn centered horizontally, just above the bottom edge
    pub fn new(arena: Vec2) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: Self::spawn_pos(arena, size),
            size,
            speed: PLAYER_SPEED,
            alive: true,
            tilt: 0.0,
        }
    }

    fn spawn_pos(arena: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            arena.x / 2.0 - size.x / 2.0,
            arena.y - size.y - PLAYER_BOTTOM_MARGIN,
        )
    }

    /// Revive and recenter
    pub fn reset(&mut self, arena: Vec2) {
        self.pos = Self::spawn_pos(arena, self.size);
        self.alive = true;
        self.tilt = 0.0;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// The solid part of the ship, excluding the sprite's transparent margins
    pub fn hitbox(&self) -> Aabb {
        self.bounds().inset(
            PLAYER_HITBOX_INSET_X,
            PLAYER_HITBOX_INSET_TOP,
            PLAYER_HITBOX_INSET_BOTTOM,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.speed;
    }

    /// Spawn a shot from the ship's nose
    pub fn shoot(&self) -> Projectile {
        Projectile::new(
            Vec2::new(self.pos.x + self.size.x / 2.0 - 1.0, self.pos.y + 2.0),
            PLAYER_PROJECTILE_SPEED,
            Owner::Player,
        )
    }

    pub fn hit(&self, projectile: &Projectile) -> bool {
        self.hitbox().overlaps(&projectile.bounds())
    }
}

/// An enemy unit in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
}

impl Invader {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(INVADER_WIDTH, INVADER_HEIGHT),
            speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.speed;
    }

    /// Drop by one body height
    pub fn move_down(&mut self) {
        self.pos.y += self.size.y;
    }

    pub fn increment_speed(&mut self, step: f32) {
        self.speed += step;
    }

    /// Spawn a shot from the invader's underside
    pub fn shoot(&self) -> Projectile {
        Projectile::new(
            Vec2::new(self.pos.x + self.size.x / 2.0 - 1.0, self.pos.y + self.size.y),
            INVADER_PROJECTILE_SPEED,
            Owner::Invader,
        )
    }

    pub fn hit(&self, projectile: &Projectile) -> bool {
        self.bounds().overlaps(&projectile.bounds())
    }

    pub fn collided(&self, obstacle: &Obstacle) -> bool {
        self.bounds().overlaps(&obstacle.bounds())
    }
}

/// A shot travelling vertically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = upward)
    pub vel_y: f32,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(pos: Vec2, vel_y: f32, owner: Owner) -> Self {
        Self {
            pos,
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            vel_y,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// 1.0 when spawned, fades to 0.0
    pub opacity: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.opacity = (self.opacity - PARTICLE_FADE).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Background star scrolling downward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Star {
    /// Scatter a star anywhere in the arena
    pub fn random(rng: &mut Pcg32, arena: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * arena.x,
                rng.random::<f32>() * arena.y,
            ),
            radius: rng.random::<f32>() * STAR_MAX_RADIUS + 0.1,
            speed: rng.random_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
        }
    }

    /// Scroll down; wrap to the top with a fresh column once off-screen
    pub fn update(&mut self, rng: &mut Pcg32, arena: Vec2) {
        self.pos.y += self.speed;
        if self.pos.y > arena.y {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * arena.x;
        }
    }
}

/// Destructible cover block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2, color: u32) -> Self {
        Self { pos, size, color }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn hit(&self, projectile: &Projectile) -> bool {
        self.bounds().overlaps(&projectile.bounds())
    }
}

/// Default particle cap when no settings are applied
pub const MAX_PARTICLES: usize = 512;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Arena (canvas) size in pixels
    pub arena: Vec2,
    pub phase: GamePhase,
    pub data: GameData,
    pub player: Player,
    pub grid: Grid,
    pub player_projectiles: Vec<Projectile>,
    pub invader_projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub obstacles: Vec<Obstacle>,
    pub stars: Vec<Star>,
    /// Fire key latch: a new shot needs the key released first
    pub fire_ready: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub max_particles: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the title screen
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let arena = Vec2::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let (rows, cols) = Grid::random_dimensions(&mut rng);

        let mut state = Self {
            seed,
            rng,
            arena,
            phase: GamePhase::Start,
            data: GameData::default(),
            player: Player::new(arena),
            grid: Grid::new(rows, cols),
            player_projectiles: Vec::new(),
            invader_projectiles: Vec::new(),
            particles: Vec::new(),
            obstacles: Vec::new(),
            stars: Vec::new(),
            fire_ready: true,
            time_ticks: 0,
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
        };

        state.init_obstacles();
        state.generate_stars(NUMBER_STARS);
        state
    }

    /// Apply quality-dependent limits
    pub fn configure(&mut self, star_count: usize, max_particles: usize) {
        self.max_particles = max_particles;
        self.generate_stars(star_count);
        self.trim_particles();
    }

    /// Place the two cover blocks either side of center
    pub fn init_obstacles(&mut self) {
        let y = self.arena.y - OBSTACLE_BOTTOM_OFFSET;
        let x = self.arena.x / 2.0 - OBSTACLE_WIDTH / 2.0;
        let offset = self.arena.x * OBSTACLE_SPREAD;
        let size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);

        self.obstacles
            .push(Obstacle::new(Vec2::new(x - offset, y), size, colors::CRIMSON));
        self.obstacles
            .push(Obstacle::new(Vec2::new(x + offset, y), size, colors::CRIMSON));
    }

    fn generate_stars(&mut self, count: usize) {
        let arena = self.arena;
        let rng = &mut self.rng;
        self.stars = (0..count).map(|_| Star::random(rng, arena)).collect();
    }

    /// Burst `count` particles outward from `center`
    pub fn create_explosion(&mut self, center: Vec2, count: usize, color: u32) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            );
            self.particles.push(Particle {
                pos: center,
                vel,
                radius: PARTICLE_RADIUS,
                color,
                opacity: 1.0,
            });
        }
        self.trim_particles();
    }

    /// Drop the oldest particles beyond the cap
    fn trim_particles(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
