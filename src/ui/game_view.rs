use crate::config::UiConfig;
use crate::game::{GameOutcome, Player, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

/// Draw one frame and return the rectangle the board was drawn in.
pub fn render(
    frame: &mut Frame,
    snapshot: &Snapshot,
    cursor: (usize, usize),
    message: &Option<String>,
    ui: &UiConfig,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                       // Header
            Constraint::Min(board_widget::BOARD_HEIGHT), // Board
            Constraint::Length(3),                       // Message
            Constraint::Length(3),                       // Controls
        ])
        .split(frame.area());

    render_header(frame, snapshot, ui.show_score, chunks[0]);
    let board = board_widget::render_board(
        frame,
        snapshot,
        Some(cursor),
        ui.highlight_legal_moves,
        chunks[1],
    );
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
    board
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Black => Color::DarkGray,
        Player::White => Color::White,
    }
}

fn render_header(frame: &mut Frame, snapshot: &Snapshot, show_score: bool, area: Rect) {
    let (status, color) = match snapshot.result {
        Some(result) => {
            let verdict = match result.outcome {
                GameOutcome::Winner(player) => format!("{} wins", player.name()),
                GameOutcome::Draw => "Draw".to_string(),
            };
            (format!("Game Over  |  {verdict}"), Color::Yellow)
        }
        None => {
            let player = snapshot.current_player;
            (
                format!("Current Player: {}", player.name()),
                player_color(player),
            )
        }
    };

    let mut spans = vec![Span::styled(
        status,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if show_score {
        spans.push(Span::raw(format!(
            "  |  Black {}  White {}",
            snapshot.score.black, snapshot.score.white
        )));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Othello"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let text = "Arrows/hjkl: Move  |  Enter/Click: Place  |  R: Restart  |  Q: Quit";
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
