//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here mutates its input.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::types::{Board, GameStatus};

/// Decides whether the game on `board` is over and who won.
///
/// A completed line wins even on a full board; a full board with no line
/// is a draw; anything else is still in progress.
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
