use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use maze_runner_core::{Direction, GameStatus, ItemKind, Model, MoveOutcome};
use ratatui::crossterm::event::KeyCode;

pub const WIN_MESSAGE: &str = "You escaped the maze! Press 'r' to play again or 'q' to quit.";
pub const LOSS_MESSAGE: &str = "You died in the maze. Press 'r' to try again or 'q' to quit.";

/// Consumables in the order of their hotkeys, `1` to `4`.
pub const HOTKEY_ITEMS: [ItemKind; 4] = [
    ItemKind::Potion,
    ItemKind::Honey,
    ItemKind::Apple,
    ItemKind::Water,
];

/// What the keyboard currently controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Playing,
    /// Typing the path of a game file to load.
    NewGame { input: String },
    ConfirmQuit,
    GameOver,
}

pub struct App {
    /// The core game state.
    pub model: Model,
    pub mode: Mode,
    /// One-line feedback shown under the stats.
    pub message: Option<String>,
    /// Flag to control the main loop.
    pub should_quit: bool,
    started: Instant,
    /// Play time frozen when the game ends.
    finished: Option<Duration>,
}

impl App {
    pub fn new(model: Model) -> Self {
        App {
            model,
            mode: Mode::Playing,
            message: None,
            should_quit: false,
            started: Instant::now(),
            finished: None,
        }
    }

    /// Time spent in the current game.
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.mode.clone() {
            Mode::Playing => self.handle_playing_key(key),
            Mode::NewGame { input } => self.handle_new_game_key(key, input),
            Mode::ConfirmQuit => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = self.resume_mode();
                }
                _ => {}
            },
            Mode::GameOver => match key {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('n') => self.mode = Mode::NewGame { input: String::new() },
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_playing_key(&mut self, key: KeyCode) {
        let direction = match key {
            KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            self.move_player(direction);
            return;
        }

        match key {
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.apply_item(HOTKEY_ITEMS[index]);
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('n') => self.mode = Mode::NewGame { input: String::new() },
            KeyCode::Char('q') | KeyCode::Esc => self.mode = Mode::ConfirmQuit,
            _ => {}
        }
    }

    fn handle_new_game_key(&mut self, key: KeyCode, mut input: String) {
        match key {
            KeyCode::Enter => self.load_game(PathBuf::from(input.trim())),
            KeyCode::Esc => self.mode = self.resume_mode(),
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::NewGame { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::NewGame { input };
            }
            _ => {}
        }
    }

    fn move_player(&mut self, direction: Direction) {
        match self.model.move_player(direction) {
            MoveOutcome::Moved => self.message = None,
            MoveOutcome::LevelUp => {
                self.message = Some(format!(
                    "Level {} of {}!",
                    self.model.level_index() + 1,
                    self.model.level_count()
                ));
            }
            MoveOutcome::Won => self.finish(WIN_MESSAGE),
            MoveOutcome::Lost => self.finish(LOSS_MESSAGE),
            MoveOutcome::Blocked | MoveOutcome::GameOver => {}
        }
    }

    fn apply_item(&mut self, kind: ItemKind) {
        self.message = Some(match self.model.apply_item(kind.name()) {
            Ok(kind) => format!("Used {kind}"),
            Err(err) => err.to_string(),
        });
    }

    fn finish(&mut self, message: &str) {
        self.finished = Some(self.started.elapsed());
        self.message = Some(message.to_string());
        self.mode = Mode::GameOver;
    }

    fn restart(&mut self) {
        self.model.restart();
        self.reset_session();
        self.message = Some("Game restarted".to_string());
    }

    fn load_game(&mut self, path: PathBuf) {
        match self.model.load_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "loaded new game");
                self.reset_session();
                self.message = Some(format!("Loaded {}", path.display()));
            }
            Err(err) => self.message = Some(format!("Wrong game path: {err}")),
        }
    }

    fn reset_session(&mut self) {
        self.started = Instant::now();
        self.finished = None;
        self.mode = Mode::Playing;
    }

    fn resume_mode(&self) -> Mode {
        if self.model.status() == GameStatus::Playing {
            Mode::Playing
        } else {
            Mode::GameOver
        }
    }
}

#[cfg(test)]
mod tests {
    use maze_runner_core::{GameConfig, Position};

    use super::*;

    const GAME: &str = "\
Maze 1 - 3 6
######
#PMCD#
######
";

    fn app() -> App {
        App::new(Model::from_source(GAME, GameConfig::default()).unwrap())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn wasd_and_arrows_move_the_player() {
        let mut app = app();
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.model.player_position(), Position::new(1, 2));
        app.handle_key(KeyCode::Left);
        assert_eq!(app.model.player_position(), Position::new(1, 1));
        app.handle_key(KeyCode::Char('w'));
        assert_eq!(app.model.player_position(), Position::new(1, 1));
    }

    #[test]
    fn hotkeys_apply_items_and_report_failures() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.message.as_deref(), Some("You don't have any Potion"));

        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.message.as_deref(), Some("Used Potion"));
        assert!(app.model.inventory().is_empty());
    }

    #[test]
    fn winning_freezes_the_timer_and_ends_play() {
        let mut app = app();
        type_text(&mut app, "ddd");
        assert_eq!(app.mode, Mode::GameOver);
        assert_eq!(app.message.as_deref(), Some(WIN_MESSAGE));
        assert_eq!(app.elapsed(), app.elapsed());

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.mode, Mode::Playing);
        assert_eq!(app.model.player_position(), Position::new(1, 1));
        assert_eq!(app.model.coins_collected(), 0);
    }

    #[test]
    fn quitting_asks_for_confirmation() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert_eq!(app.mode, Mode::ConfirmQuit);
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Playing);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn bad_game_path_keeps_the_prompt_and_the_game() {
        let mut app = app();
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('n'));
        type_text(&mut app, "/no/such/gamex");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(
            app.mode,
            Mode::NewGame {
                input: "/no/such/game".to_string()
            }
        );

        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::NewGame { .. }));
        assert!(app.message.as_deref().unwrap().starts_with("Wrong game path"));
        assert_eq!(app.model.player_position(), Position::new(1, 2));

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.mode, Mode::Playing);
    }
}
