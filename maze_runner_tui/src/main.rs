mod app;
mod view;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use maze_runner_core::{GameConfig, Model};
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
};
use std::{
    io::{self, Stdout},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use view::{LevelRenderer, RendererKind};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Game file to load
    #[arg(short, long, value_name = "GAME_FILE", default_value = "games/game1.txt")]
    game: PathBuf,

    /// TOML file overriding the default game rules
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// How the maze is drawn
    #[arg(short, long, value_enum, default_value_t)]
    renderer: RendererKind,

    /// Directory for the log file
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = args.log_dir.unwrap_or_else(default_log_directory);
    let _guard = setup_logging(&log_dir)?;

    let config = match &args.config {
        Some(path) => GameConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let model = Model::from_file(&args.game, config)
        .with_context(|| format!("Failed to load game {}", args.game.display()))?;
    tracing::info!(
        game = %args.game.display(),
        levels = model.level_count(),
        renderer = ?args.renderer,
        "starting game"
    );

    let renderer = args.renderer.build();
    let mut app = App::new(model);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, renderer.as_ref());
    restore_terminal(&mut terminal)?;

    result
}

/// Logs to a file; a TUI owns stdout and stderr.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "maze_runner.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/maze_runner.log", log_dir.display());
    Ok(guard)
}

/// Platform cache directory, falling back to the system temp dir.
///
/// - macOS: `~/Library/Caches/maze_runner/logs`
/// - Linux: `~/.cache/maze_runner/logs` (or `$XDG_CACHE_HOME/maze_runner/logs`)
/// - Windows: `%LOCALAPPDATA%\maze_runner\cache\logs`
fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "maze_runner")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("maze_runner").join("logs"))
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    renderer: &dyn LevelRenderer,
) -> Result<()> {
    // Redraw at least this often so the timer keeps ticking.
    let tick_rate = Duration::from_millis(250);

    while !app.should_quit {
        terminal.draw(|f| view::ui(f, app, renderer))?;

        if crossterm::event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    tracing::info!(
        status = ?app.model.status(),
        moves = app.model.moves(),
        "quitting"
    );
    Ok(())
}
