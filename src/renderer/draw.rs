//! Draw-list generation for 2D primitives
//!
//! Turns a `GameState` into backend-agnostic draw commands so what is on
//! screen can be checked without a canvas.

use glam::Vec2;

use crate::colors;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Owner, Player};

/// A single 2D drawing operation (screen space, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: u32 },
    /// Axis-aligned filled rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        color: u32,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
        alpha: f32,
    },
    /// Filled convex polygon
    Polygon { points: Vec<Vec2>, color: u32 },
}

/// Rotate `point` around `pivot` by `angle` radians
#[inline]
fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}

/// Ship hull: an arrowhead filling the hitbox, rolled by the tilt angle
pub fn ship(player: &Player, tilt: f32) -> DrawCommand {
    let hull = player.hitbox();
    let pivot = player.center();
    let nose = Vec2::new(hull.center().x, hull.min.y);
    let left = Vec2::new(hull.min.x, hull.max.y);
    let notch = Vec2::new(hull.center().x, hull.max.y - hull.height() * 0.25);
    let right = Vec2::new(hull.max.x, hull.max.y);

    DrawCommand::Polygon {
        points: [nose, right, notch, left]
            .into_iter()
            .map(|p| rotate_about(p, pivot, tilt))
            .collect(),
        color: colors::SHIP_BLUE,
    }
}

/// Build the full frame, back to front
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        1 + state.stars.len()
            + state.player_projectiles.len()
            + state.invader_projectiles.len()
            + state.particles.len()
            + state.obstacles.len()
            + state.grid.len()
            + 1,
    );

    commands.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    for star in &state.stars {
        commands.push(DrawCommand::Circle {
            center: star.pos,
            radius: star.radius,
            color: colors::WHITE,
            alpha: 1.0,
        });
    }

    // Title screen shows only the starfield
    if state.phase == GamePhase::Start {
        return commands;
    }

    for projectile in state
        .player_projectiles
        .iter()
        .chain(state.invader_projectiles.iter())
    {
        let color = match projectile.owner {
            Owner::Player => colors::PLAYER_SHOT,
            Owner::Invader => colors::INVADER_SHOT,
        };
        commands.push(DrawCommand::Rect {
            pos: projectile.pos,
            size: projectile.size,
            color,
        });
    }

    for particle in &state.particles {
        commands.push(DrawCommand::Circle {
            center: particle.pos,
            radius: particle.radius,
            color: particle.color,
            alpha: particle.opacity,
        });
    }

    for obstacle in &state.obstacles {
        commands.push(DrawCommand::Rect {
            pos: obstacle.pos,
            size: obstacle.size,
            color: obstacle.color,
        });
    }

    for invader in &state.grid.invaders {
        commands.push(DrawCommand::Rect {
            pos: invader.pos,
            size: invader.size,
            color: colors::INVADER,
        });
    }

    if state.phase == GamePhase::Playing && state.player.alive {
        let tilt = if settings.effective_ship_tilt() {
            state.player.tilt
        } else {
            0.0
        };
        commands.push(ship(&state.player, tilt));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, start, tick};

    fn count_color(commands: &[DrawCommand], wanted: u32) -> usize {
        commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Rect { color, .. }
                | DrawCommand::Circle { color, .. }
                | DrawCommand::Polygon { color, .. } => *color == wanted,
                DrawCommand::Clear { .. } => false,
            })
            .count()
    }

    #[test]
    fn test_title_screen_is_starfield_only() {
        let state = GameState::new(1, 800.0, 600.0);
        let commands = build_frame(&state, &Settings::default());
        assert_eq!(commands.len(), 1 + state.stars.len());
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_playing_frame_contents() {
        let mut state = GameState::new(1, 800.0, 600.0);
        start(&mut state);
        let commands = build_frame(&state, &Settings::default());

        assert_eq!(count_color(&commands, colors::INVADER), state.grid.len());
        assert_eq!(count_color(&commands, colors::CRIMSON), 2);
        // Ship drawn last
        assert!(matches!(commands.last(), Some(DrawCommand::Polygon { .. })));
    }

    #[test]
    fn test_ship_hidden_after_game_over() {
        let mut state = GameState::new(1, 800.0, 600.0);
        start(&mut state);
        state.player.alive = false;
        let commands = build_frame(&state, &Settings::default());
        assert_eq!(count_color(&commands, colors::SHIP_BLUE), 0);
    }

    #[test]
    fn test_ship_tilt_follows_settings() {
        let mut state = GameState::new(1, 800.0, 600.0);
        start(&mut state);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert!(state.player.tilt < 0.0);

        let rolled = ship(&state.player, state.player.tilt);
        let level = ship(&state.player, 0.0);
        assert_ne!(rolled, level);

        let mut settings = Settings::default();
        settings.reduced_motion = true;
        let frame = build_frame(&state, &settings);
        assert_eq!(frame.last(), Some(&level));
    }

    #[test]
    fn test_rotation_keeps_distance_to_pivot() {
        let pivot = Vec2::new(10.0, 10.0);
        let p = Vec2::new(20.0, 10.0);
        let r = rotate_about(p, pivot, 0.15);
        assert!(((r - pivot).length() - 10.0).abs() < 1e-4);
        assert_eq!(rotate_about(p, pivot, 0.0), p);
    }
}
