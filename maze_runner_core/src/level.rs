//! Parsing of level-description files.
//!
//! A file holds one or more levels separated by blank lines. Each level is a
//! header followed by exactly `rows` lines of `cols` characters:
//!
//! ```text
//! Maze 1 - 4 6
//! ######
//! #P C #
//! #  L D
//! ######
//! ```
//!
//! `#` wall, space floor, `L` lava, `D` door (the exit), `P` entry, and the
//! item symbols `C` coin, `M` potion, `H` honey, `A` apple, `W` water.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    Position,
    item::{Item, ItemKind},
    map::Grid,
    maze::{Maze, MazeError},
    tile::Tile,
};

const ENTRY_SYMBOL: char = 'P';
const HEADER_PREFIX: &str = "Maze";

/// Reasons a level-description resource can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read game file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Game file contains no levels")]
    NoLevels,
    #[error("Line {line}: expected a header like 'Maze 1 - <rows> <cols>', found '{text}'")]
    MalformedHeader { line: usize, text: String },
    #[error("Level {level}: expected {expected} rows, found {found}")]
    MissingRows {
        level: usize,
        expected: usize,
        found: usize,
    },
    #[error("Level {level}, line {line}: expected {expected} columns, found {found}")]
    RowLength {
        level: usize,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Level {level}, line {line}: unknown symbol '{symbol}' in column {col}")]
    UnknownSymbol {
        level: usize,
        line: usize,
        col: usize,
        symbol: char,
    },
    #[error("Level {level}: no {marker} found")]
    MissingMarker { level: usize, marker: &'static str },
    #[error("Level {level}: second {marker} at {second:?} (first at {first:?})")]
    DuplicateMarker {
        level: usize,
        marker: &'static str,
        first: Position,
        second: Position,
    },
    #[error("Level {level}: {source}")]
    Maze {
        level: usize,
        #[source]
        source: MazeError,
    },
}

/// Reads and parses every level in the file at `path`.
pub fn load_levels_from_file(path: impl AsRef<Path>) -> Result<Vec<Maze>, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_levels_from_string(&source)
}

/// Parses every level in `source`. Any malformed level fails the whole load.
pub fn load_levels_from_string(source: &str) -> Result<Vec<Maze>, LoadError> {
    let lines: Vec<&str> = source
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    let mut levels = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        if lines[cursor].trim().is_empty() {
            cursor += 1;
            continue;
        }
        let level = levels.len() + 1;
        let (rows, cols) = parse_header(lines[cursor], cursor + 1)?;
        let body_start = cursor + 1;
        let body = body_start
            .checked_add(rows)
            .and_then(|end| lines.get(body_start..end))
            .ok_or(LoadError::MissingRows {
                level,
                expected: rows,
                found: lines.len() - body_start,
            })?;
        levels.push(parse_level(level, body_start + 1, body, cols)?);
        cursor = body_start + rows;
    }

    if levels.is_empty() {
        return Err(LoadError::NoLevels);
    }
    tracing::debug!(levels = levels.len(), "parsed game file");
    Ok(levels)
}

/// Parses `Maze <n> - <rows> <cols>` into `(rows, cols)`.
fn parse_header(text: &str, line: usize) -> Result<(usize, usize), LoadError> {
    let malformed = || LoadError::MalformedHeader {
        line,
        text: text.to_string(),
    };
    let rest = text.trim().strip_prefix(HEADER_PREFIX).ok_or_else(malformed)?;
    let (number, dimensions) = rest.split_once('-').ok_or_else(malformed)?;
    number.trim().parse::<usize>().map_err(|_| malformed())?;

    let dimensions: Vec<usize> = dimensions
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;
    match dimensions[..] {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(malformed()),
    }
}

/// Parses the body of one level. `first_line` is the 1-based line number of `body[0]`.
fn parse_level(
    level: usize,
    first_line: usize,
    body: &[&str],
    cols: usize,
) -> Result<Maze, LoadError> {
    let rows = body.len();
    if rows == 0 || cols == 0 {
        return Err(LoadError::Maze {
            level,
            source: MazeError::Empty { rows, cols },
        });
    }

    let mut tile_rows = Vec::with_capacity(rows);
    let mut items = HashMap::new();
    let mut entry: Option<Position> = None;
    let mut exit: Option<Position> = None;

    for (row, text) in body.iter().enumerate() {
        let line = first_line + row;
        let symbols: Vec<char> = text.chars().collect();
        if symbols.len() != cols {
            return Err(LoadError::RowLength {
                level,
                line,
                expected: cols,
                found: symbols.len(),
            });
        }

        let mut tiles = Vec::with_capacity(cols);
        for (col, symbol) in symbols.into_iter().enumerate() {
            let pos = Position { row, col };
            let tile = if symbol == ENTRY_SYMBOL {
                place_marker(level, "entry", &mut entry, pos)?;
                Tile::Floor
            } else if let Some(kind) = ItemKind::from_symbol(symbol) {
                items.insert(pos, Item::new(kind));
                Tile::Floor
            } else if let Some(tile) = Tile::from_symbol(symbol) {
                if tile == Tile::Door {
                    place_marker(level, "exit", &mut exit, pos)?;
                }
                tile
            } else {
                return Err(LoadError::UnknownSymbol {
                    level,
                    line,
                    col: col + 1,
                    symbol,
                });
            };
            tiles.push(tile);
        }
        tile_rows.push(tiles);
    }

    let tiles = Grid::from_generator(rows, cols, |pos| tile_rows[pos.row][pos.col]);
    let entry = entry.ok_or(LoadError::MissingMarker {
        level,
        marker: "entry",
    })?;
    let exit = exit.ok_or(LoadError::MissingMarker {
        level,
        marker: "exit",
    })?;

    Maze::new(tiles, items, entry, exit).map_err(|source| LoadError::Maze { level, source })
}

fn place_marker(
    level: usize,
    marker: &'static str,
    slot: &mut Option<Position>,
    pos: Position,
) -> Result<(), LoadError> {
    match slot {
        Some(first) => Err(LoadError::DuplicateMarker {
            level,
            marker,
            first: *first,
            second: pos,
        }),
        None => {
            *slot = Some(pos);
            Ok(())
        }
    }
}
