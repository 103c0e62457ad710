//! Terminal UI: renders board snapshots and turns key presses and mouse
//! clicks into move and restart requests.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
