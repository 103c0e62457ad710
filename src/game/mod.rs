//! Core Othello game logic: board representation, player types, and the turn
//! state machine with forced passes and end-of-game scoring.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, DIRECTIONS, SIZE};
pub use player::Player;
pub use state::{GameOutcome, GameResult, GameState, MoveReport, Score, Snapshot, TurnEvent};
