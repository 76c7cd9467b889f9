use std::io::Write;

use maze_runner_core::{
    GameConfig, LoadError, Model, Position, Tile, load_levels_from_file, load_levels_from_string,
};

const BUNDLED_GAME: &str = include_str!("../../games/game1.txt");

#[test]
fn bundled_game_parses() {
    let levels = load_levels_from_string(BUNDLED_GAME).unwrap();
    assert_eq!(levels.len(), 3);
    for maze in &levels {
        assert_eq!(maze.get_tile(maze.exit()), Ok(Tile::Door));
        assert!(maze.is_walkable(maze.entry()));
    }
}

#[test]
fn games_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Maze 1 - 3 4\n####\n#PD#\n####\n").unwrap();

    let model = Model::from_file(file.path(), GameConfig::default()).unwrap();
    assert_eq!(model.level_count(), 1);
    assert_eq!(model.player_position(), Position::new(1, 1));
}

#[test]
fn missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let err = load_levels_from_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn load_file_switches_games_and_survives_bad_paths() {
    let mut model = Model::from_source(BUNDLED_GAME, GameConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    assert!(model.load_file(dir.path().join("missing.txt")).is_err());
    assert_eq!(model.level_count(), 3);

    let path = dir.path().join("tiny.txt");
    std::fs::write(&path, "Maze 1 - 1 2\nPD\n").unwrap();
    model.load_file(&path).unwrap();
    assert_eq!(model.level_count(), 1);
    assert_eq!(model.current_maze().dimensions(), (1, 2));
}

#[test]
fn config_files_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[effects]\npotion = 50\n\n[decay]\nlava_damage = 25").unwrap();

    let config = GameConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.effects.potion, 50);
    assert_eq!(config.decay.lava_damage, 25);
    assert_eq!(config.effects.water, GameConfig::default().effects.water);
}

#[test]
fn bundled_hard_rules_parse() {
    let config = GameConfig::from_toml_str(include_str!("../../games/hard.toml")).unwrap();
    assert_eq!(config.limits.thirst, 15);
    assert_eq!(config.decay.lava_damage, 20);
    assert_eq!(config.effects.honey, GameConfig::default().effects.honey);
    assert_eq!(config.starting_stats().health, 60);
}
