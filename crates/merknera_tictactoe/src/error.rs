//! Error types for the engine.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while reading or editing a board.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardErrorKind {
    /// The board did not have exactly nine cells.
    #[display("expected 9 cells, got {}", _0)]
    WrongLength(usize),
    /// A cell held something other than "", "X" or "O".
    #[display("unknown mark {:?}", _0)]
    UnknownMark(String),
    /// A position outside 0-8.
    #[display("position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),
}

/// Board error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", kind, file, line)]
pub struct BoardError {
    /// Error details.
    pub kind: BoardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BoardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    #[track_caller]
    pub(crate) fn wrong_length(len: usize) -> Self {
        Self::new(BoardErrorKind::WrongLength(len))
    }

    #[track_caller]
    pub(crate) fn unknown_mark(mark: &str) -> Self {
        Self::new(BoardErrorKind::UnknownMark(mark.to_string()))
    }

    #[track_caller]
    pub(crate) fn out_of_bounds(pos: usize) -> Self {
        Self::new(BoardErrorKind::OutOfBounds(pos))
    }
}

/// Why move selection failed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// The board has no empty cell.
    #[display("no legal move: board is full")]
    NoLegalMove,
    /// A search worker panicked or was cancelled.
    #[display("search worker failed: {}", _0)]
    Worker(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error details.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<tokio::task::JoinError> for EngineError {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(EngineErrorKind::Worker(err.to_string()))
    }
}
