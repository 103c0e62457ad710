use crate::config::{AppConfig, UiConfig};
use crate::game::{GameOutcome, GameResult, GameState, MoveReport, TurnEvent, SIZE};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::Duration;

pub struct App {
    game_state: GameState,
    ui: UiConfig,
    auto_restart: bool,
    cursor: (usize, usize),
    should_quit: bool,
    message: Option<String>,
    /// Where the board was last drawn, for mapping mouse clicks.
    board_area: Rect,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            game_state: GameState::initial().with_auto_restart(config.rules.auto_restart),
            ui: config.ui.clone(),
            auto_restart: config.rules.auto_restart,
            cursor: (2, 3), // Start on one of Black's opening moves
            should_quit: false,
            message: None,
            board_area: Rect::default(),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        tracing::info!("starting game loop");
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                tracing::info!("quit requested");
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle terminal events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.ui.poll_interval_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let (row, col) = self.cursor;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => self.cursor.1 = col.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.1 = (col + 1).min(SIZE - 1),
            KeyCode::Up | KeyCode::Char('k') => self.cursor.0 = row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.0 = (row + 1).min(SIZE - 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(row, col),
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    /// Handle mouse input; a left click on a cell places there
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some((row, col)) =
                super::board_widget::cell_at(self.board_area, mouse.column, mouse.row)
            {
                self.cursor = (row, col);
                self.place(row, col);
            }
        }
    }

    fn restart(&mut self) {
        tracing::info!("restart requested");
        self.game_state.restart();
        self.message = Some("New game started!".to_string());
    }

    /// Try to place the current player's piece. Illegal cells are ignored.
    fn place(&mut self, row: usize, col: usize) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        if let Some(report) = self.game_state.request_move(row, col) {
            self.message = self.describe(&report);
        }
    }

    fn describe(&self, report: &MoveReport) -> Option<String> {
        let notices: Vec<String> = report
            .events
            .iter()
            .map(|event| match event {
                TurnEvent::TurnSkipped(player) => {
                    format!("{} has no legal move, turn skipped.", player.name())
                }
                TurnEvent::GameOver(result) => self.game_over_text(result),
            })
            .collect();
        (!notices.is_empty()).then(|| notices.join(" "))
    }

    fn game_over_text(&self, result: &GameResult) -> String {
        let verdict = match result.outcome {
            GameOutcome::Winner(player) => format!("{} wins!", player.name()),
            GameOutcome::Draw => "It's a draw!".to_string(),
        };
        let mut text = format!(
            "Game over! Black {} - White {}. {verdict}",
            result.score.black, result.score.white
        );
        if self.auto_restart {
            text.push_str(" New game started.");
        }
        text
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let snapshot = self.game_state.snapshot();
        self.board_area =
            super::game_view::render(frame, &snapshot, self.cursor, &self.message, &self.ui);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
