use std::{collections::HashMap, path::Path};

use crate::{
    Direction, Position,
    config::GameConfig,
    inventory::Inventory,
    item::{Item, ItemKind},
    level::{LoadError, load_levels_from_file, load_levels_from_string},
    maze::Maze,
    player::{Player, Stats},
    tile::Tile,
};

/// Overall state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Represents the outcome of a single [`Model::move_player`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target was a wall or outside the maze; nothing changed.
    Blocked,
    Moved,
    /// The player reached a level's exit and now stands at the next level's entry.
    LevelUp,
    Won,
    Lost,
    /// The game had already ended; nothing changed.
    GameOver,
}

/// Reasons [`Model::apply_item`] can refuse to use an item. None of them change the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("You don't have any {name}")]
    Unavailable { name: String },
    #[error("{0} can't be used")]
    NotConsumable(ItemKind),
    #[error("The game is over")]
    GameOver,
}

/// Owns the levels and the player, and resolves every player command.
#[derive(Debug, Clone)]
pub struct Model {
    config: GameConfig,
    /// Untouched copy of the levels, used by [`Model::restart`].
    initial_levels: Vec<Maze>,
    levels: Vec<Maze>,
    level: usize,
    player: Player,
    status: GameStatus,
    leveled_up: bool,
    moves: u32,
}

impl Model {
    /// Starts a game on the first of `levels`.
    pub fn new(levels: Vec<Maze>, config: GameConfig) -> Result<Self, LoadError> {
        let first = levels.first().ok_or(LoadError::NoLevels)?;
        let player = Player::new(first.entry(), config.starting_stats(), config.limits);
        Ok(Model {
            config,
            initial_levels: levels.clone(),
            levels,
            level: 0,
            player,
            status: GameStatus::Playing,
            leveled_up: false,
            moves: 0,
        })
    }

    pub fn from_source(source: &str, config: GameConfig) -> Result<Self, LoadError> {
        Self::new(load_levels_from_string(source)?, config)
    }

    pub fn from_file(path: impl AsRef<Path>, config: GameConfig) -> Result<Self, LoadError> {
        Self::new(load_levels_from_file(path)?, config)
    }

    /// Attempts to move the player one step and resolves the resulting turn.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_over() {
            return MoveOutcome::GameOver;
        }
        self.leveled_up = false;

        let maze = &self.levels[self.level];
        let Some((target, tile)) = self
            .player
            .position()
            .offset(direction.delta())
            .filter(|&pos| maze.is_walkable(pos))
            .and_then(|pos| Some((pos, maze.get_tile(pos).ok()?)))
        else {
            tracing::debug!(?direction, from = ?self.player.position(), "move blocked");
            return MoveOutcome::Blocked;
        };

        self.player.set_position(target);
        self.moves += 1;
        self.decay_stats();
        if tile == Tile::Lava {
            self.player
                .apply_stat_delta(-i64::from(self.config.decay.lava_damage), 0, 0);
        }
        if let Some(item) = self.levels[self.level].pickup(target) {
            tracing::debug!(kind = %item.kind(), position = ?target, "picked up item");
            self.player.inventory_mut().add(item);
        }

        if self.player.is_dead() {
            self.status = GameStatus::Lost;
            tracing::info!(level = self.level + 1, moves = self.moves, "player died");
            return MoveOutcome::Lost;
        }
        if target != self.levels[self.level].exit() {
            return MoveOutcome::Moved;
        }
        if self.level + 1 == self.levels.len() {
            self.status = GameStatus::Won;
            tracing::info!(moves = self.moves, "player escaped the final level");
            return MoveOutcome::Won;
        }

        self.level += 1;
        self.leveled_up = true;
        let entry = self.levels[self.level].entry();
        self.player.set_position(entry);
        tracing::info!(level = self.level + 1, "advanced to next level");
        MoveOutcome::LevelUp
    }

    /// Hunger and thirst drop every move; an empty stat costs health instead.
    fn decay_stats(&mut self) {
        let decay = self.config.decay;
        self.player.apply_stat_delta(
            0,
            -i64::from(decay.hunger),
            -i64::from(decay.thirst),
        );
        let stats = self.player.stats();
        if stats.hunger == 0 || stats.thirst == 0 {
            self.player
                .apply_stat_delta(-i64::from(decay.starvation_penalty), 0, 0);
        }
    }

    /// Uses one item of the category called `name` from the player's inventory.
    pub fn apply_item(&mut self, name: &str) -> Result<ItemKind, ItemError> {
        if self.status.is_over() {
            return Err(ItemError::GameOver);
        }
        self.leveled_up = false;

        let unavailable = || ItemError::Unavailable {
            name: name.to_string(),
        };
        let kind: ItemKind = name.parse().map_err(|_| unavailable())?;
        if self.player.inventory().count(kind) == 0 {
            return Err(unavailable());
        }
        if kind.is_currency() {
            return Err(ItemError::NotConsumable(kind));
        }

        let item = self
            .player
            .inventory_mut()
            .remove(kind)
            .ok_or_else(unavailable)?;
        item.apply(&mut self.player, &self.config.effects);
        tracing::debug!(%kind, stats = ?self.player.stats(), "applied item");
        Ok(kind)
    }

    /// Starts the current game over from its first level.
    pub fn restart(&mut self) {
        self.levels = self.initial_levels.clone();
        self.level = 0;
        self.player = Player::new(
            self.levels[0].entry(),
            self.config.starting_stats(),
            self.config.limits,
        );
        self.status = GameStatus::Playing;
        self.leveled_up = false;
        self.moves = 0;
        tracing::info!(levels = self.levels.len(), "game restarted");
    }

    /// Replaces the game with the levels described by `source`.
    ///
    /// On error the current game is left untouched.
    pub fn load(&mut self, source: &str) -> Result<(), LoadError> {
        let levels = load_levels_from_string(source).inspect_err(|err| {
            tracing::warn!(%err, "rejected game description");
        })?;
        self.replace_levels(levels);
        Ok(())
    }

    /// Like [`Model::load`], reading the description from `path`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let levels = load_levels_from_file(path).inspect_err(|err| {
            tracing::warn!(%err, path = %path.display(), "rejected game file");
        })?;
        self.replace_levels(levels);
        Ok(())
    }

    fn replace_levels(&mut self, levels: Vec<Maze>) {
        self.initial_levels = levels;
        self.restart();
    }

    pub fn current_maze(&self) -> &Maze {
        &self.levels[self.level]
    }

    pub fn current_items(&self) -> &HashMap<Position, Item> {
        self.current_maze().items()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_position(&self) -> Position {
        self.player.position()
    }

    pub fn player_stats(&self) -> Stats {
        self.player.stats()
    }

    pub fn inventory(&self) -> &Inventory {
        self.player.inventory()
    }

    pub fn coins_collected(&self) -> usize {
        self.inventory().count(ItemKind::Coin)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn has_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn has_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    /// True right after a move that completed a level, until the next command.
    pub fn did_level_up(&self) -> bool {
        self.leveled_up
    }

    /// Zero-based index of the current level.
    pub fn level_index(&self) -> usize {
        self.level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
Maze 1 - 3 6
######
#PLCD#
######
";

    #[test]
    fn empty_level_list_is_rejected() {
        assert!(matches!(
            Model::new(Vec::new(), GameConfig::default()),
            Err(LoadError::NoLevels)
        ));
    }

    #[test]
    fn lava_costs_health_on_top_of_decay() {
        let mut model = Model::from_source(CORRIDOR, GameConfig::default()).unwrap();
        let before = model.player_stats();
        assert_eq!(model.move_player(Direction::Right), MoveOutcome::Moved);
        let decay = model.config().decay;
        assert_eq!(
            model.player_stats(),
            Stats::new(
                before.health - decay.lava_damage,
                before.hunger - decay.hunger,
                before.thirst - decay.thirst
            )
        );
    }

    #[test]
    fn level_up_signal_lasts_until_the_next_move() {
        let source = format!("{CORRIDOR}\nMaze 2 - 1 3\nP D\n");
        let mut model = Model::from_source(&source, GameConfig::default()).unwrap();
        for _ in 0..2 {
            model.move_player(Direction::Right);
        }
        assert_eq!(model.move_player(Direction::Right), MoveOutcome::LevelUp);
        assert!(model.did_level_up());
        assert_eq!(model.player_position(), Position::new(0, 0));

        assert_eq!(model.move_player(Direction::Up), MoveOutcome::Blocked);
        assert!(!model.did_level_up());
    }

    #[test]
    fn using_an_item_clears_the_level_up_signal() {
        let source = format!("{CORRIDOR}\nMaze 2 - 1 3\nP D\n");
        let mut model = Model::from_source(&source, GameConfig::default()).unwrap();
        for _ in 0..3 {
            model.move_player(Direction::Right);
        }
        assert!(model.did_level_up());

        assert_eq!(
            model.apply_item("Coin"),
            Err(ItemError::NotConsumable(ItemKind::Coin))
        );
        assert!(!model.did_level_up());
    }

    #[test]
    fn coins_are_counted_but_cannot_be_applied() {
        let mut model = Model::from_source(CORRIDOR, GameConfig::default()).unwrap();
        assert_eq!(
            model.apply_item("Coin"),
            Err(ItemError::Unavailable {
                name: "Coin".to_string()
            })
        );
        model.move_player(Direction::Right);
        model.move_player(Direction::Right);
        assert_eq!(model.coins_collected(), 1);

        let stats = model.player_stats();
        assert_eq!(
            model.apply_item("coin"),
            Err(ItemError::NotConsumable(ItemKind::Coin))
        );
        assert_eq!(model.coins_collected(), 1);
        assert_eq!(model.player_stats(), stats);
    }

    #[test]
    fn failed_load_keeps_the_current_game() {
        let mut model = Model::from_source(CORRIDOR, GameConfig::default()).unwrap();
        model.move_player(Direction::Right);
        let position = model.player_position();

        assert!(model.load("Maze 1 - 1 2\nP?").is_err());
        assert_eq!(model.player_position(), position);
        assert_eq!(model.moves(), 1);

        model.load("Maze 1 - 1 3\nD P\n").unwrap();
        assert_eq!(model.player_position(), Position::new(0, 2));
        assert_eq!(model.level_count(), 1);
        assert_eq!(model.moves(), 0);
    }
}
