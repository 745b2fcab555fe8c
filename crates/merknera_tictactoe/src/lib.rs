//! Tic-tac-toe engine for Merknera bots.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Player`], [`Square`] and [`GameStatus`]
//! - **Rules**: [`evaluate`] decides whether a board is terminal
//! - **Search**: [`score`] runs exhaustive minimax for one hypothetical move
//! - **Selection**: [`MoveSelector`] scores every open cell in parallel
//!
//! # Example
//!
//! ```no_run
//! use merknera_tictactoe::{Board, Player, select_move};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board: Board = "X,X,,O,O,,,,".parse()?;
//! let position = select_move(&board, Player::X).await?;
//! assert_eq!(position, 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod rules;
mod search;
mod selector;
mod types;

pub use error::{BoardError, BoardErrorKind, EngineError, EngineErrorKind};
pub use rules::{check_winner, evaluate, is_full};
pub use search::{DRAW, LOSS, Score, WIN, score};
pub use selector::{Choice, MoveSelector, ScoredMove, select_move};
pub use types::{Board, CELLS, GameStatus, Player, Square};
