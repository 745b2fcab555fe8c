//! Exhaustive minimax scoring of a single hypothetical move.

use crate::rules::evaluate;
use crate::types::{Board, GameStatus, Player};

/// Score of a move, from one player's point of view.
pub type Score = i32;

/// Base value of a won game.
pub const WIN: Score = 10;
/// Base value of a lost game.
pub const LOSS: Score = -10;
/// Value of a drawn game.
pub const DRAW: Score = 0;

/// Scores `to_play` placing a mark at `position` on a copy of `board`,
/// from `perspective`'s point of view, assuming both sides play on
/// optimally until the game ends.
///
/// Terminal positions score [`WIN`] or [`LOSS`] plus `level`, or [`DRAW`].
/// Each ply below the root passes `level - 1`, so callers start at 0.
/// Replies are tried in ascending cell order and the first best score wins
/// ties. `board` itself is never modified.
pub fn score(
    board: &Board,
    perspective: Player,
    position: usize,
    to_play: Player,
    level: Score,
) -> Score {
    let next = board.with_move(position, to_play);

    match evaluate(&next) {
        GameStatus::Draw => DRAW,
        GameStatus::Won(winner) if winner == perspective => WIN + level,
        GameStatus::Won(_) => LOSS + level,
        GameStatus::InProgress => {
            let reply = to_play.opponent();
            let maximizing = reply == perspective;

            next.open_cells()
                .into_iter()
                .map(|cell| score(&next, perspective, cell, reply, level - 1))
                .reduce(|best, s| {
                    if (maximizing && s > best) || (!maximizing && s < best) {
                        s
                    } else {
                        best
                    }
                })
                // In-progress boards always have an open cell.
                .unwrap_or(DRAW)
        }
    }
}
