//! Invader formation
//!
//! The grid marches sideways as a block. When any invader touches a side of
//! the arena the whole grid steps down one body height, reverses, and every
//! invader speeds up a little.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Invader;
use crate::consts::*;

/// Horizontal march direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// A wave of invaders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
    pub invaders: Vec<Invader>,
    /// Shared horizontal speed, inherited by the next wave
    pub velocity: f32,
    pub direction: Direction,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            invaders: layout(rows, cols, INVADER_START_SPEED),
            velocity: INVADER_START_SPEED,
            direction: Direction::Right,
        }
    }

    /// Roll a wave size: rows and cols each in 1..=10, never a lone invader
    pub fn random_dimensions(rng: &mut Pcg32) -> (u32, u32) {
        let rows = rng.random_range(1..=GRID_MAX_DIM);
        let cols = rng.random_range(1..=GRID_MAX_DIM);
        if rows * cols < 2 {
            (rows, 2)
        } else {
            (rows, cols)
        }
    }

    /// Lay out a fresh wave at the current shared speed
    pub fn restart(&mut self, rows: u32, cols: u32) {
        self.rows = rows;
        self.cols = cols;
        self.invaders = layout(rows, cols, self.velocity);
        self.direction = Direction::Right;
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    fn reached_right_boundary(&self, arena_width: f32) -> bool {
        self.invaders
            .iter()
            .any(|inv| inv.pos.x + inv.size.x >= arena_width)
    }

    fn reached_left_boundary(&self) -> bool {
        self.invaders.iter().any(|inv| inv.pos.x <= 0.0)
    }

    /// March one tick. The grid only steps down while the player is alive.
    pub fn update(&mut self, player_alive: bool, arena_width: f32) {
        let mut move_down = false;

        if self.direction == Direction::Right && self.reached_right_boundary(arena_width) {
            self.direction = Direction::Left;
            move_down = true;
        } else if self.direction == Direction::Left && self.reached_left_boundary() {
            self.direction = Direction::Right;
            move_down = true;
        }

        if !player_alive {
            move_down = false;
        }

        for invader in &mut self.invaders {
            if move_down {
                invader.move_down();
                invader.increment_speed(INVADER_SPEED_STEP);
                self.velocity = invader.speed;
            }

            match self.direction {
                Direction::Right => invader.move_right(),
                Direction::Left => invader.move_left(),
            }
        }
    }

    /// Pick a live invader uniformly at random
    pub fn random_invader(&self, rng: &mut Pcg32) -> Option<&Invader> {
        if self.invaders.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.invaders.len());
        self.invaders.get(index)
    }
}

fn layout(rows: u32, cols: u32, speed: f32) -> Vec<Invader> {
    let mut invaders = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = Vec2::new(
                col as f32 * GRID_COL_SPACING + GRID_ORIGIN_X,
                row as f32 * GRID_ROW_SPACING + GRID_ORIGIN_Y,
            );
            invaders.push(Invader::new(pos, speed));
        }
    }
    invaders
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_layout() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.invaders[0].pos, Vec2::new(20.0, 120.0));
        // Row-major: index 5 is row 1, col 1
        assert_eq!(grid.invaders[5].pos, Vec2::new(70.0, 157.0));
        assert_eq!(grid.direction, Direction::Right);
    }

    #[test]
    fn test_marches_right() {
        let mut grid = Grid::new(1, 2);
        grid.update(true, 800.0);
        assert_eq!(grid.invaders[0].pos, Vec2::new(21.0, 120.0));
        assert_eq!(grid.direction, Direction::Right);
    }

    #[test]
    fn test_right_edge_steps_down_and_reverses() {
        let mut grid = Grid::new(1, 1);
        grid.invaders[0].pos.x = 800.0 - INVADER_WIDTH;

        grid.update(true, 800.0);

        let inv = &grid.invaders[0];
        assert_eq!(grid.direction, Direction::Left);
        assert_eq!(inv.pos.y, 120.0 + INVADER_HEIGHT);
        assert!((inv.speed - 1.1).abs() < 1e-6);
        assert!((grid.velocity - 1.1).abs() < 1e-6);
        // Moved left at the new speed
        assert!((inv.pos.x - (800.0 - INVADER_WIDTH - 1.1)).abs() < 1e-4);
    }

    #[test]
    fn test_left_edge_steps_down_and_reverses() {
        let mut grid = Grid::new(1, 1);
        grid.direction = Direction::Left;
        grid.invaders[0].pos.x = 0.0;

        grid.update(true, 800.0);
        assert_eq!(grid.direction, Direction::Right);
        assert_eq!(grid.invaders[0].pos.y, 120.0 + INVADER_HEIGHT);
    }

    #[test]
    fn test_no_descent_while_player_dead() {
        let mut grid = Grid::new(1, 1);
        grid.invaders[0].pos.x = 800.0 - INVADER_WIDTH;

        grid.update(false, 800.0);

        assert_eq!(grid.direction, Direction::Left);
        assert_eq!(grid.invaders[0].pos.y, 120.0);
        assert_eq!(grid.invaders[0].speed, INVADER_START_SPEED);
    }

    #[test]
    fn test_restart_inherits_velocity() {
        let mut grid = Grid::new(1, 1);
        grid.velocity = 1.5;
        grid.direction = Direction::Left;
        grid.restart(2, 3);
        assert_eq!(grid.len(), 6);
        assert_eq!((grid.rows, grid.cols), (2, 3));
        assert_eq!(grid.direction, Direction::Right);
        assert!(grid.invaders.iter().all(|i| i.speed == 1.5));
    }

    #[test]
    fn test_random_invader() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut grid = Grid::new(2, 2);
        assert!(grid.random_invader(&mut rng).is_some());
        grid.invaders.clear();
        assert!(grid.random_invader(&mut rng).is_none());
    }

    proptest! {
        #[test]
        fn wave_size_in_bounds(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..16 {
                let (rows, cols) = Grid::random_dimensions(&mut rng);
                prop_assert!((1..=GRID_MAX_DIM).contains(&rows));
                prop_assert!((1..=GRID_MAX_DIM).contains(&cols));
                let count = Grid::new(rows, cols).len();
                prop_assert!((2..=100).contains(&count));
            }
        }
    }
}
