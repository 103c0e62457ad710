use super::{Board, Player, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Piece counts for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    pub fn of(board: &Board) -> Self {
        let (black, white) = board.count_pieces();
        Score { black, white }
    }

    /// Whoever holds more pieces wins; equal counts are a draw
    pub fn outcome(self) -> GameOutcome {
        use std::cmp::Ordering;
        match self.black.cmp(&self.white) {
            Ordering::Greater => GameOutcome::Winner(Player::Black),
            Ordering::Less => GameOutcome::Winner(Player::White),
            Ordering::Equal => GameOutcome::Draw,
        }
    }
}

/// Final score and winner of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: Score,
    pub outcome: GameOutcome,
}

impl GameResult {
    pub fn of(board: &Board) -> Self {
        let score = Score::of(board);
        GameResult {
            score,
            outcome: score.outcome(),
        }
    }
}

/// Notifications raised while resolving whose turn is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// The player had no legal placement and lost their turn.
    TurnSkipped(Player),
    GameOver(GameResult),
}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    pub row: usize,
    pub col: usize,
    pub flipped: usize,
    pub events: Vec<TurnEvent>,
}

impl MoveReport {
    pub fn game_result(&self) -> Option<GameResult> {
        self.events.iter().find_map(|event| match event {
            TurnEvent::GameOver(result) => Some(*result),
            TurnEvent::TurnSkipped(_) => None,
        })
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub current_player: Player,
    /// Per-cell legal-move flags for `current_player`; all false once the game is over.
    pub legal: [[bool; SIZE]; SIZE],
    pub score: Score,
    pub result: Option<GameResult>,
}

/// A single game: the board, whose turn it is, and the result once finished.
///
/// With auto-restart on (the default), a finished game is reported through
/// [`TurnEvent::GameOver`] and the state immediately returns to the opening
/// position. With it off, the finished state is kept until [`GameState::restart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    result: Option<GameResult>,
    auto_restart: bool,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Black, // Black starts
            result: None,
            auto_restart: true,
        }
    }

    /// Resume from an arbitrary position with `current_player` to move
    pub fn from_position(board: Board, current_player: Player) -> Self {
        GameState {
            board,
            current_player,
            result: None,
            auto_restart: true,
        }
    }

    pub fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the result if the game is over and was not auto-restarted
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> Score {
        Score::of(&self.board)
    }

    /// Whether the current player may place at (row, col)
    pub fn is_legal(&self, row: usize, col: usize) -> bool {
        !self.is_terminal() && self.board.is_valid_move(row, col, self.current_player)
    }

    /// Attempt a placement at (row, col) for the current player.
    ///
    /// Illegal or out-of-range requests, and any request after the game has
    /// finished, are ignored: `None` is returned and nothing changes.
    pub fn request_move(&mut self, row: usize, col: usize) -> Option<MoveReport> {
        if !self.is_legal(row, col) {
            tracing::trace!(row, col, player = %self.current_player, "ignoring illegal move");
            return None;
        }

        let player = self.current_player;
        let flipped = self.board.apply_move(row, col, player);
        tracing::debug!(row, col, %player, flipped, "move applied");

        let events = self.advance_turn(player);
        Some(MoveReport {
            player,
            row,
            col,
            flipped,
            events,
        })
    }

    /// Decide who moves after `mover` has played.
    ///
    /// A full board ends the game. Otherwise the opponent moves if they can;
    /// if not, their turn is skipped and `mover` goes again. When neither side
    /// can move the game ends.
    pub fn advance_turn(&mut self, mover: Player) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        let next = mover.opponent();

        if self.board.is_full() {
            self.finish(&mut events);
        } else if self.board.has_any_valid_move(next) {
            self.current_player = next;
        } else {
            tracing::debug!(skipped = %next, "no legal move, turn skipped");
            events.push(TurnEvent::TurnSkipped(next));
            if self.board.has_any_valid_move(mover) {
                self.current_player = mover;
            } else {
                self.finish(&mut events);
            }
        }
        events
    }

    fn finish(&mut self, events: &mut Vec<TurnEvent>) {
        let result = GameResult::of(&self.board);
        tracing::info!(
            black = result.score.black,
            white = result.score.white,
            outcome = ?result.outcome,
            "game over"
        );
        tracing::trace!("final board:\n{}", self.board);
        events.push(TurnEvent::GameOver(result));

        if self.auto_restart {
            self.restart();
        } else {
            self.result = Some(result);
        }
    }

    /// Reset to the opening position with Black to move
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.current_player = Player::Black;
        self.result = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut legal = [[false; SIZE]; SIZE];
        for (row, flags) in legal.iter_mut().enumerate() {
            for (col, flag) in flags.iter_mut().enumerate() {
                *flag = self.is_legal(row, col);
            }
        }
        Snapshot {
            board: self.board,
            current_player: self.current_player,
            legal,
            score: self.score(),
            result: self.result,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn full_board(black: usize) -> Board {
        let text: String = (0..SIZE * SIZE)
            .map(|i| {
                let symbol = if i < black { 'B' } else { 'W' };
                if i % SIZE == SIZE - 1 {
                    format!("{symbol}\n")
                } else {
                    symbol.to_string()
                }
            })
            .collect();
        text.parse().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Black);
        assert!(!state.is_terminal());
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.score(), Score { black: 2, white: 2 });
    }

    #[test]
    fn test_opening_move_switches_to_white() {
        let mut state = GameState::initial();
        let report = state.request_move(2, 3).unwrap();

        assert_eq!(report.player, Player::Black);
        assert_eq!(report.flipped, 1);
        assert!(report.events.is_empty());
        assert_eq!(state.current_player(), Player::White);

        let board = state.board();
        assert_eq!(board.get(2, 3), Cell::Black);
        assert_eq!(board.get(3, 3), Cell::Black);
        assert_eq!(board.get(3, 4), Cell::Black);
        assert_eq!(board.get(4, 3), Cell::Black);
        assert_eq!(board.get(4, 4), Cell::White);
    }

    #[test]
    fn test_illegal_move_is_ignored() {
        let mut state = GameState::initial();
        let before = state.clone();

        assert!(state.request_move(0, 0).is_none());
        assert!(state.request_move(3, 3).is_none());
        assert!(state.request_move(8, 2).is_none());
        // (2,4) is legal for White only
        assert!(state.request_move(2, 4).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_opponent_without_moves_is_skipped() {
        let mut state = GameState::from_position(
            "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            BW......
            "
            .parse()
            .unwrap(),
            Player::Black,
        );

        let report = state.request_move(7, 2).unwrap();
        assert_eq!(report.events, vec![TurnEvent::TurnSkipped(Player::White)]);
        assert_eq!(state.current_player(), Player::Black);
        assert!(!state.is_terminal());

        let expected: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            BBB.....
            "
        .parse()
        .unwrap();
        assert_eq!(state.board(), &expected);
    }

    #[test]
    fn test_skip_leaves_board_untouched() {
        let board: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            BBB.....
            "
        .parse()
        .unwrap();
        let mut state = GameState::from_position(board, Player::White);

        let events = state.advance_turn(Player::Black);
        assert_eq!(events, vec![TurnEvent::TurnSkipped(Player::White)]);
        assert_eq!(state.current_player(), Player::Black);
        assert_eq!(state.board(), &board);
    }

    #[test]
    fn test_double_pass_ends_game() {
        let mut state = GameState::from_position(
            "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            "
            .parse()
            .unwrap(),
            Player::Black,
        )
        .with_auto_restart(false);

        let report = state.request_move(0, 2).unwrap();
        let result = GameResult {
            score: Score { black: 3, white: 0 },
            outcome: GameOutcome::Winner(Player::Black),
        };
        assert_eq!(
            report.events,
            vec![
                TurnEvent::TurnSkipped(Player::White),
                TurnEvent::GameOver(result)
            ]
        );
        assert!(!state.board().is_full());
        assert_eq!(state.result(), Some(result));
    }

    #[test]
    fn test_full_board_black_wins() {
        let mut state =
            GameState::from_position(full_board(34), Player::White).with_auto_restart(false);
        let events = state.advance_turn(Player::Black);

        let result = GameResult {
            score: Score { black: 34, white: 30 },
            outcome: GameOutcome::Winner(Player::Black),
        };
        assert_eq!(events, vec![TurnEvent::GameOver(result)]);
        assert_eq!(state.result(), Some(result));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_full_board_white_wins() {
        let mut state =
            GameState::from_position(full_board(20), Player::Black).with_auto_restart(false);
        state.advance_turn(Player::White);
        assert_eq!(
            state.result().map(|r| r.outcome),
            Some(GameOutcome::Winner(Player::White))
        );
    }

    #[test]
    fn test_filling_last_cell_draws_and_auto_restarts() {
        let mut state = GameState::from_position(
            "
            .WBBBBBB
            BBBBBBBB
            BBBBBBBB
            BBBBBBBB
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            WWWWWWWW
            "
            .parse()
            .unwrap(),
            Player::Black,
        );

        let report = state.request_move(0, 0).unwrap();
        assert_eq!(report.flipped, 1);
        let result = report.game_result().unwrap();
        assert_eq!(result.score, Score { black: 32, white: 32 });
        assert_eq!(result.outcome, GameOutcome::Draw);

        // back to the opening position
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_finished_game_ignores_moves() {
        let mut state =
            GameState::from_position(full_board(40), Player::White).with_auto_restart(false);
        state.advance_turn(Player::Black);
        assert!(state.is_terminal());

        let before = state.clone();
        for row in 0..SIZE {
            for col in 0..SIZE {
                assert!(state.request_move(row, col).is_none());
            }
        }
        assert_eq!(state, before);
        assert!(state.snapshot().legal.iter().flatten().all(|&flag| !flag));
    }

    #[test]
    fn test_restart_resets_mid_game() {
        let mut state = GameState::initial();
        state.request_move(2, 3).unwrap();
        state.request_move(2, 2).unwrap();
        assert_ne!(state.board(), &Board::new());

        state.restart();
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.current_player(), Player::Black);
        assert!(state.result().is_none());
    }

    #[test]
    fn test_restart_leaves_game_over() {
        let mut state =
            GameState::from_position(full_board(32), Player::White).with_auto_restart(false);
        state.advance_turn(Player::Black);
        assert_eq!(state.result().map(|r| r.outcome), Some(GameOutcome::Draw));

        state.restart();
        assert!(!state.is_terminal());
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_snapshot_marks_legal_moves() {
        let snapshot = GameState::initial().snapshot();
        let legal: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| snapshot.legal[r][c])
            .collect();

        assert_eq!(legal, vec![(2, 3), (3, 2), (4, 5), (5, 4)]);
        assert_eq!(snapshot.current_player, Player::Black);
        assert_eq!(snapshot.score, Score { black: 2, white: 2 });
        assert!(snapshot.result.is_none());
    }

    #[test]
    fn test_score_outcome() {
        assert_eq!(Score { black: 34, white: 30 }.outcome(), GameOutcome::Winner(Player::Black));
        assert_eq!(Score { black: 10, white: 12 }.outcome(), GameOutcome::Winner(Player::White));
        assert_eq!(Score { black: 32, white: 32 }.outcome(), GameOutcome::Draw);
    }
}
