use serde::{Deserialize, Serialize};

pub mod config;
pub mod inventory;
pub mod item;
pub mod level;
pub mod map;
pub mod maze;
pub mod model;
pub mod player;
pub mod tile;

pub use config::{ConfigError, DecayRules, GameConfig, ItemEffects, StartStats, StatLimits};
pub use inventory::Inventory;
pub use item::{Item, ItemKind};
pub use level::{LoadError, load_levels_from_file, load_levels_from_string};
pub use map::{Grid, GridError};
pub use maze::{Maze, MazeError};
pub use model::{GameStatus, ItemError, Model, MoveOutcome};
pub use player::{Player, Stats};
pub use tile::Tile;

/// Represents a (row, column) coordinate inside a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns the position shifted by `(d_row, d_col)`.
    ///
    /// Returns `None` if either coordinate would become negative or overflow.
    pub fn offset(self, (d_row, d_col): (isize, isize)) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

/// The four directions a player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the `(d_row, d_col)` delta for this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
