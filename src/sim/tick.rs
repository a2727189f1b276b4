//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, plus the
//! phase transitions driven by the Play/Restart buttons and the periodic
//! invader fire timer.

use super::grid::Grid;
use super::state::{GameEvent, GamePhase, GameState, Owner};
use crate::colors;
use crate::consts::*;

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let arena = state.arena;
    let rng = &mut state.rng;
    for star in &mut state.stars {
        star.update(rng, arena);
    }

    match state.phase {
        GamePhase::Start => {}
        GamePhase::Playing => tick_playing(state, input),
        GamePhase::GameOver => tick_game_over(state),
    }

    // Releasing fire re-arms the gun in any phase
    if !input.fire {
        state.fire_ready = true;
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    spawn_grid(state);

    update_projectiles(state);
    update_particles(state);

    check_shoot_invaders(state);
    check_shoot_player(state);
    check_shoot_obstacles(state);
    check_invaders_collided_obstacles(state);
    check_player_collided_invaders(state);

    state.grid.update(state.player.alive, state.arena.x);

    // A hit this tick ends the run before the ship can act
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.fire && state.fire_ready {
        let shot = state.player.shoot();
        state.player_projectiles.push(shot);
        state.fire_ready = false;
        state.push_event(GameEvent::PlayerShot);
    }

    let player = &mut state.player;
    player.tilt = 0.0;
    if input.left && player.pos.x >= 0.0 {
        player.move_left();
        player.tilt -= PLAYER_TILT;
    }
    if input.right && player.pos.x <= state.arena.x - player.size.x {
        player.move_right();
        player.tilt += PLAYER_TILT;
    }
}

/// The arena keeps moving behind the game-over screen, minus the ship
fn tick_game_over(state: &mut GameState) {
    check_shoot_obstacles(state);
    update_projectiles(state);
    update_particles(state);
    state.grid.update(state.player.alive, state.arena.x);
}

/// Move shots and drop those that left the arena
fn update_projectiles(state: &mut GameState) {
    for projectile in state
        .player_projectiles
        .iter_mut()
        .chain(state.invader_projectiles.iter_mut())
    {
        projectile.update();
    }

    let height = state.arena.y;
    state.player_projectiles.retain(|p| p.pos.y > 0.0);
    state.invader_projectiles.retain(|p| p.pos.y <= height);
}

fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());
}

/// Player shots against invaders: each hit consumes both
fn check_shoot_invaders(state: &mut GameState) {
    let mut i = 0;
    while i < state.grid.invaders.len() {
        let invader = &state.grid.invaders[i];
        let Some(j) = state.player_projectiles.iter().position(|p| invader.hit(p)) else {
            i += 1;
            continue;
        };

        let center = invader.center();
        state.grid.invaders.remove(i);
        state.player_projectiles.remove(j);

        state.create_explosion(center, 10, colors::INVADER_EXPLOSION);
        state.data.increment_score(INVADER_SCORE);
        state.push_event(GameEvent::InvaderHit);
        log::debug!("Invader destroyed, score {}", state.data.score);
    }
}

/// Invader shots against the ship
fn check_shoot_player(state: &mut GameState) {
    let player = &state.player;
    let before = state.invader_projectiles.len();
    state.invader_projectiles.retain(|p| !player.hit(p));

    if state.invader_projectiles.len() < before {
        game_over(state);
    }
}

/// Obstacles absorb shots from both sides
fn check_shoot_obstacles(state: &mut GameState) {
    let obstacles = &state.obstacles;
    state
        .player_projectiles
        .retain(|p| !obstacles.iter().any(|o| o.hit(p)));
    state
        .invader_projectiles
        .retain(|p| !obstacles.iter().any(|o| o.hit(p)));
}

/// Invaders plough through any obstacle they touch
fn check_invaders_collided_obstacles(state: &mut GameState) {
    let invaders = &state.grid.invaders;
    let before = state.obstacles.len();
    state
        .obstacles
        .retain(|o| !invaders.iter().any(|inv| inv.collided(o)));

    let destroyed = before - state.obstacles.len();
    if destroyed > 0 {
        log::debug!("{} obstacle(s) destroyed by invaders", destroyed);
    }
}

/// An invader that reaches the ship's row inside its span ends the run
fn check_player_collided_invaders(state: &mut GameState) {
    let player = &state.player;
    let contact = state.grid.invaders.iter().any(|inv| {
        inv.pos.x >= player.pos.x
            && inv.pos.x <= player.pos.x + player.size.x
            && inv.pos.y >= player.pos.y
    });

    if contact {
        game_over(state);
    }
}

/// Regenerate the grid once a wave is cleared
fn spawn_grid(state: &mut GameState) {
    if !state.grid.is_empty() {
        return;
    }

    let (rows, cols) = Grid::random_dimensions(&mut state.rng);
    state.grid.restart(rows, cols);
    state.data.increment_level();
    state.push_event(GameEvent::NextLevel);

    if state.obstacles.is_empty() {
        state.init_obstacles();
    }

    log::info!(
        "Level {}: {}x{} grid ({} invaders)",
        state.data.level,
        rows,
        cols,
        state.grid.len()
    );
}

/// Destroy the ship and end the run. Only acts while playing.
fn game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let center = state.player.center();
    state.create_explosion(center, 10, colors::WHITE);
    state.create_explosion(center, 5, colors::SHIP_BLUE);
    state.create_explosion(center, 5, colors::CRIMSON);

    state.player.alive = false;
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::PlayerExploded);

    log::info!(
        "Game over: score {} at level {} (high {})",
        state.data.score,
        state.data.level,
        state.data.high
    );
}

/// Leave the title screen. Returns false if the game was already started.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Start {
        return false;
    }
    state.phase = GamePhase::Playing;
    log::info!("Game started with seed {}", state.seed);
    true
}

/// Begin a new run after game over. Returns false outside GameOver.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }

    state.phase = GamePhase::Playing;
    state.player.reset(state.arena);
    state.invader_projectiles.clear();
    state.player_projectiles.clear();
    state.data.reset();
    state.fire_ready = true;

    state.grid.velocity = INVADER_START_SPEED;
    let (rows, cols) = Grid::random_dimensions(&mut state.rng);
    state.grid.restart(rows, cols);

    if state.obstacles.is_empty() {
        state.init_obstacles();
    }

    log::info!("Game restarted ({}x{} grid)", rows, cols);
    true
}

/// Periodic timer: a random live invader fires downward
pub fn fire_invader_shot(state: &mut GameState) {
    if state.phase == GamePhase::Start {
        return;
    }

    if let Some(invader) = state.grid.random_invader(&mut state.rng) {
        let shot = invader.shoot();
        debug_assert_eq!(shot.owner, Owner::Invader);
        state.invader_projectiles.push(shot);
    }
}
