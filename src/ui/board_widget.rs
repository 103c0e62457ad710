use crate::game::{Cell, Snapshot, SIZE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CELL_WIDTH: u16 = 3;
/// Row label plus left border, e.g. `"1 ║"`.
const LEFT_MARGIN: u16 = 3;
/// Column labels plus top border.
const TOP_MARGIN: u16 = 2;

pub const BOARD_WIDTH: u16 = LEFT_MARGIN + CELL_WIDTH * SIZE as u16 + 1;
pub const BOARD_HEIGHT: u16 = TOP_MARGIN + SIZE as u16 + 1;

const BOARD_BG: Color = Color::Green;

/// The rectangle the board occupies when centered in `area`.
pub fn board_rect(area: Rect) -> Rect {
    let width = BOARD_WIDTH.min(area.width);
    let height = BOARD_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Map a terminal position to the board cell drawn there, if any.
pub fn cell_at(board: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
    let left = board.x + LEFT_MARGIN;
    let top = board.y + TOP_MARGIN;
    if x < left || y < top {
        return None;
    }
    let col = usize::from((x - left) / CELL_WIDTH);
    let row = usize::from(y - top);
    (row < SIZE && col < SIZE).then_some((row, col))
}

/// Render the board centered in `area` and return the rectangle it occupies.
pub fn render_board(
    frame: &mut Frame,
    snapshot: &Snapshot,
    cursor: Option<(usize, usize)>,
    highlight_legal: bool,
    area: Rect,
) -> Rect {
    let rect = board_rect(area);
    let border = Style::default().fg(Color::Gray);
    let mut lines = Vec::with_capacity(usize::from(BOARD_HEIGHT));

    let mut labels = vec![Span::raw(" ".repeat(usize::from(LEFT_MARGIN)))];
    for col in 0..SIZE {
        let letter = char::from(b'a' + col as u8);
        labels.push(Span::raw(format!(" {letter} ")));
    }
    labels.push(Span::raw(" "));
    lines.push(Line::from(labels));

    let rule = "═".repeat(SIZE * usize::from(CELL_WIDTH));
    lines.push(Line::styled(format!("  ╔{rule}╗"), border));

    for row in 0..SIZE {
        let mut spans = vec![
            Span::raw(format!("{} ", row + 1)),
            Span::styled("║", border),
        ];
        for col in 0..SIZE {
            let (symbol, fg) = match snapshot.board.get(row, col) {
                Cell::Black => (" ● ", Color::Black),
                Cell::White => (" ● ", Color::White),
                Cell::Empty if highlight_legal && snapshot.legal[row][col] => {
                    (" · ", Color::Yellow)
                }
                Cell::Empty => ("   ", BOARD_BG),
            };
            let mut style = Style::default().fg(fg).bg(BOARD_BG);
            if cursor == Some((row, col)) {
                style = style.bg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
        }
        spans.push(Span::styled("║", border));
        lines.push(Line::from(spans));
    }

    lines.push(Line::styled(format!("  ╚{rule}╝"), border));

    frame.render_widget(Paragraph::new(lines), rect);
    rect
}
