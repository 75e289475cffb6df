//! Stateless UI rendering for Dots & Boxes.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use super::input;
use crate::db::KeyValueStore;
use crate::games::dots_and_boxes::{BoxId, Game, LineId, Orientation, Player};

const GAME_HELP: &str = "←↑↓→ move  Tab flip  Enter/Space claim  r reset  m menu  q quit";
const MENU_HELP: &str = "Enter start  m toggle mode  +/- grid size  q quit";

/// Renders the current screen.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    match app.session().game() {
        Some(game) => draw_game(frame, app, game),
        None => draw_menu(frame, app),
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Blue,
    }
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
}

fn draw_menu<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let session = app.session();
    let area = center_rect(frame.area(), 52, 14);

    let stats = session.stats();
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Mode:  ", label),
            Span::raw(session.mode().label()),
        ]),
        Line::from(vec![
            Span::styled("Grid:  ", label),
            Span::raw(session.grid().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Played: ", label),
            Span::raw(stats.games_played().to_string()),
            Span::styled("  Ties: ", label),
            Span::raw(stats.ties().to_string()),
        ]),
    ];
    for player in [Player::One, Player::Two] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} wins: ", session.player_name(player)),
                Style::default().fg(player_color(player)),
            ),
            Span::raw(stats.wins(player).to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        MENU_HELP,
        Style::default().fg(Color::Yellow),
    )));
    if let Some(event) = app.last_event() {
        lines.push(Line::from(Span::styled(
            event.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Dots & Boxes ").borders(Borders::ALL));
    frame.render_widget(menu, area);
}

fn draw_game<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, game: &Game) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Board
            Constraint::Length(1), // Scores
            Constraint::Length(4), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    frame.render_widget(
        title(&format!("Strictly Dots - {}", app.session().mode().label())),
        chunks[0],
    );

    let dots = game.grid().dots() as u16;
    let board_area = center_rect(chunks[1], 4 * dots - 3, 2 * dots - 1);
    frame.render_widget(Paragraph::new(board_lines(game, app.cursor())), board_area);

    let scores = game.scores();
    let score_line = Line::from(
        [Player::One, Player::Two]
            .into_iter()
            .flat_map(|p| {
                [
                    Span::styled(
                        format!("{}: {}", app.session().player_name(p), scores.get(p)),
                        Style::default()
                            .fg(player_color(p))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("    "),
                ]
            })
            .collect::<Vec<_>>(),
    );
    frame.render_widget(
        Paragraph::new(score_line).alignment(Alignment::Center),
        chunks[2],
    );

    let mut status = vec![Line::from(app.session().status())];
    if let Some(event) = app.last_event() {
        status.push(Line::from(Span::styled(
            event.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    frame.render_widget(
        Paragraph::new(GAME_HELP)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

/// One text line per lattice row.
fn board_lines(game: &Game, cursor: LineId) -> Vec<Line<'static>> {
    let extent = 2 * game.grid().dots() - 1;
    let cursor = input::lattice(cursor);
    (0..extent)
        .map(|y| {
            Line::from(
                (0..extent)
                    .map(|x| cell(game, y, x, (y, x) == cursor))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn cell(game: &Game, y: usize, x: usize, under_cursor: bool) -> Span<'static> {
    match (y % 2, x % 2) {
        (0, 0) => Span::styled("●", Style::default().fg(Color::White)),
        (1, 1) => match game.box_owner(BoxId::new(y / 2, x / 2)) {
            Some(owner) => Span::styled(
                format!(" {} ", &owner.color_name()[..1]),
                Style::default()
                    .fg(Color::White)
                    .bg(player_color(owner))
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::raw("   "),
        },
        _ => {
            let Some(line) = input::line_at(game.grid(), y, x) else {
                return Span::raw(" ");
            };
            let symbol = match (line.orientation, game.is_drawn(line)) {
                (Orientation::Horizontal, true) => "───",
                (Orientation::Horizontal, false) => " · ",
                (Orientation::Vertical, true) => "│",
                (Orientation::Vertical, false) => "·",
            };
            let style = match game.line_owner(line) {
                Some(owner) => Style::default().fg(player_color(owner)),
                None => Style::default().fg(Color::DarkGray),
            };
            let style = if under_cursor {
                style.bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                style
            };
            Span::styled(symbol, style)
        }
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
