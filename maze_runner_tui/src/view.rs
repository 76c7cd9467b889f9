use clap::ValueEnum;
use maze_runner_core::{ItemKind, Model, Position, Tile};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, HOTKEY_ITEMS, Mode};

/// Turns maze contents into styled cells.
pub trait LevelRenderer {
    fn tile(&self, tile: Tile) -> Span<'static>;
    fn item(&self, kind: ItemKind) -> Span<'static>;
    fn player(&self) -> Span<'static>;
}

/// Selects a [`LevelRenderer`] on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RendererKind {
    /// Level-file symbols, no colour.
    Glyph,
    /// Coloured blocks and symbols.
    #[default]
    Color,
}

impl RendererKind {
    pub fn build(self) -> Box<dyn LevelRenderer> {
        match self {
            RendererKind::Glyph => Box::new(GlyphRenderer),
            RendererKind::Color => Box::new(ColorRenderer),
        }
    }
}

/// Draws every cell with the symbol used for it in level files.
pub struct GlyphRenderer;

impl LevelRenderer for GlyphRenderer {
    fn tile(&self, tile: Tile) -> Span<'static> {
        Span::raw(tile.id().to_string())
    }

    fn item(&self, kind: ItemKind) -> Span<'static> {
        Span::raw(kind.id().to_string())
    }

    fn player(&self) -> Span<'static> {
        Span::raw("P")
    }
}

pub struct ColorRenderer;

impl ColorRenderer {
    fn item_color(kind: ItemKind) -> Color {
        match kind {
            ItemKind::Coin => Color::Yellow,
            ItemKind::Potion => Color::Magenta,
            ItemKind::Honey => Color::LightYellow,
            ItemKind::Apple => Color::LightRed,
            ItemKind::Water => Color::LightBlue,
        }
    }
}

impl LevelRenderer for ColorRenderer {
    fn tile(&self, tile: Tile) -> Span<'static> {
        match tile {
            Tile::Floor => Span::raw(" "),
            Tile::Wall => Span::styled("█", Style::default().fg(Color::DarkGray)),
            Tile::Lava => Span::styled("≈", Style::default().fg(Color::Red).bg(Color::LightRed)),
            Tile::Door => Span::styled("▒", Style::default().fg(Color::Green)),
        }
    }

    fn item(&self, kind: ItemKind) -> Span<'static> {
        Span::styled(
            kind.id().to_ascii_lowercase().to_string(),
            Style::default().fg(Self::item_color(kind)).bold(),
        )
    }

    fn player(&self) -> Span<'static> {
        Span::styled("@", Style::default().fg(Color::LightMagenta).bold())
    }
}

/// Renders the user interface.
pub fn ui(frame: &mut Frame, app: &App, renderer: &dyn LevelRenderer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title banner
            Constraint::Min(5),    // Maze and inventory
            Constraint::Length(4), // Stats
            Constraint::Length(2), // Status/help
        ])
        .split(frame.area());

    let banner = Paragraph::new("MazeRunner")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Black).bg(Color::LightGreen).bold())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, main_layout[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_layout[1]);
    render_map(frame, middle[0], &app.model, renderer);
    render_inventory(frame, middle[1], &app.model);
    render_stats(frame, main_layout[2], app);

    let status = app.message.clone().unwrap_or_else(|| {
        "wasd/arrows move · 1-4 use item · r restart · n new game · q quit".to_string()
    });
    let status_line = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_line, main_layout[3]);

    match &app.mode {
        Mode::NewGame { input } => render_popup(
            frame,
            "New game",
            vec![
                Line::from("Please enter a new game file path:"),
                Line::from(Span::styled(
                    format!("{input}_"),
                    Style::default().fg(Color::Yellow),
                )),
            ],
        ),
        Mode::ConfirmQuit => render_popup(
            frame,
            "Quit",
            vec![Line::from("Are you sure you would like to quit? (y/n)")],
        ),
        Mode::Playing | Mode::GameOver => {}
    }
}

/// Builds the map rows, drawing the player over items and items over tiles.
pub fn map_lines(model: &Model, renderer: &dyn LevelRenderer) -> Vec<Line<'static>> {
    let maze = model.current_maze();
    let player = model.player_position();

    maze.tiles()
        .row_slices()
        .enumerate()
        .map(|(row, tiles)| {
            let spans: Vec<Span> = tiles
                .iter()
                .enumerate()
                .map(|(col, tile)| {
                    let pos = Position { row, col };
                    if pos == player {
                        renderer.player()
                    } else if let Some(item) = maze.item_at(pos) {
                        renderer.item(item.kind())
                    } else {
                        renderer.tile(*tile)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Renders the current maze onto the frame.
fn render_map(frame: &mut Frame, area: Rect, model: &Model, renderer: &dyn LevelRenderer) {
    let title = format!(
        "Level {}/{}",
        model.level_index() + 1,
        model.level_count()
    );
    let map_paragraph = Paragraph::new(map_lines(model, renderer))
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(map_paragraph, area);
}

/// Renders the non-coin inventory items with their hotkeys and quantities.
fn render_inventory(frame: &mut Frame, area: Rect, model: &Model) {
    let inventory_items: Vec<ListItem> = model
        .inventory()
        .items()
        .iter()
        .filter(|(kind, _)| !kind.is_currency())
        .map(|(kind, items)| {
            let hotkey = HOTKEY_ITEMS
                .iter()
                .position(|k| k == kind)
                .map_or(String::new(), |i| format!("[{}] ", i + 1));
            ListItem::new(format!("{hotkey}{kind}: {}", items.len()))
                .style(Style::default().fg(ColorRenderer::item_color(*kind)))
        })
        .collect();

    let inventory_widget =
        List::new(inventory_items).block(Block::default().borders(Borders::ALL).title("Inventory"));
    frame.render_widget(inventory_widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.model.player_stats();
    let limits = app.model.config().limits;
    let elapsed = app.elapsed().as_secs();

    let cells = [
        ("HP", format!("{}/{}", stats.health, limits.health)),
        ("Hunger", format!("{}/{}", stats.hunger, limits.hunger)),
        ("Thirst", format!("{}/{}", stats.thirst, limits.thirst)),
        ("Coins", app.model.coins_collected().to_string()),
        ("Timer", format!("{}m {}s", elapsed / 60, elapsed % 60)),
    ];
    let header = Row::new(cells.iter().map(|(label, _)| Cell::from(*label)))
        .style(Style::default().bold());
    let values = Row::new(cells.iter().map(|(_, value)| Cell::from(value.clone())));
    let table = Table::new([values], [Constraint::Ratio(1, 5); 5])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Stats"));
    frame.render_widget(table, area);
}

fn render_popup(frame: &mut Frame, title: &str, lines: Vec<Line>) {
    let area = centered_rect(60, 5, frame.area());
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// A rect `percent_x` wide and `height` tall in the middle of `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
