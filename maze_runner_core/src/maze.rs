use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Position,
    item::Item,
    map::{Grid, GridError},
    tile::Tile,
};

/// Reasons a maze cannot be assembled from its parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("Maze has zero size ({rows}x{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("The {marker} at {position:?} is outside the maze or inside a wall")]
    BlockedMarker {
        marker: &'static str,
        position: Position,
    },
    #[error("Item at {position:?} is outside the maze or inside a wall")]
    BlockedItem { position: Position },
}

/// A single level: an immutable tile grid plus the items still lying in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    tiles: Grid<Tile>,
    items: HashMap<Position, Item>,
    entry: Position,
    exit: Position,
}

impl Maze {
    /// Assembles a maze, checking that the entry, exit and every item sit on walkable tiles.
    pub fn new(
        tiles: Grid<Tile>,
        items: HashMap<Position, Item>,
        entry: Position,
        exit: Position,
    ) -> Result<Self, MazeError> {
        if tiles.rows() == 0 || tiles.cols() == 0 {
            return Err(MazeError::Empty {
                rows: tiles.rows(),
                cols: tiles.cols(),
            });
        }
        let walkable = |pos: Position| tiles.get(pos).is_some_and(|tile| tile.is_walkable());
        for (marker, position) in [("entry", entry), ("exit", exit)] {
            if !walkable(position) {
                return Err(MazeError::BlockedMarker { marker, position });
            }
        }
        if let Some(&position) = items.keys().find(|&&pos| !walkable(pos)) {
            return Err(MazeError::BlockedItem { position });
        }
        Ok(Maze {
            tiles,
            items,
            entry,
            exit,
        })
    }

    pub fn get_tile(&self, pos: Position) -> Result<Tile, GridError> {
        self.tiles.try_get(pos).copied()
    }

    /// False for positions outside the maze as well as for walls.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tiles.get(pos).is_some_and(|tile| tile.is_walkable())
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.get(&pos)
    }

    /// Removes and returns the item at `pos`, if any.
    pub fn pickup(&mut self, pos: Position) -> Option<Item> {
        self.items.remove(&pos)
    }

    /// Returns `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.tiles.rows(), self.tiles.cols())
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn items(&self) -> &HashMap<Position, Item> {
        &self.items
    }

    pub fn entry(&self) -> Position {
        self.entry
    }

    pub fn exit(&self) -> Position {
        self.exit
    }
}
