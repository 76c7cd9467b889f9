use serde::{Deserialize, Serialize};

/// Represents the static type of a cell in a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Floor,
    Wall,
    /// Walkable, but hurts whoever steps on it.
    Lava,
    /// The exit of a level.
    Door,
}

impl Tile {
    pub const ALL: [Tile; 4] = [Tile::Floor, Tile::Wall, Tile::Lava, Tile::Door];

    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// The character used for this tile in level files.
    pub fn id(self) -> char {
        match self {
            Tile::Floor => ' ',
            Tile::Wall => '#',
            Tile::Lava => 'L',
            Tile::Door => 'D',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Tile> {
        Tile::ALL.into_iter().find(|tile| tile.id() == symbol)
    }
}
