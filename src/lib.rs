//! # TUI Othello
//!
//! Othello (Reversi) on an 8×8 board, played in the terminal. The rules engine
//! is independent of the terminal front end: it takes move requests and hands
//! back board snapshots and turn notifications.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, turn state machine
//! - [`ui`]: Terminal UI: board rendering, keyboard and mouse input
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
