//! Core domain types for tic-tac-toe.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
///
/// On the wire an empty square is `""` and an occupied one is the mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Square::Empty);
        }
        Player::from_str(s)
            .map(Square::Occupied)
            .map_err(|_| BoardError::unknown_mark(s))
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        match square {
            Square::Empty => String::new(),
            Square::Occupied(player) => player.to_string(),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values, so every hypothetical move works on its
/// own copy and the caller's board is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Square>", into = "Vec<Square>")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given position.
    #[track_caller]
    pub fn set(&mut self, pos: usize, square: Square) -> Result<(), BoardError> {
        let slot = self
            .squares
            .get_mut(pos)
            .ok_or_else(|| BoardError::out_of_bounds(pos))?;
        *slot = square;
        Ok(())
    }

    /// Returns a copy of this board with `player`'s mark at `pos`.
    ///
    /// Out-of-range positions leave the copy unchanged.
    pub fn with_move(&self, pos: usize, player: Player) -> Self {
        let mut next = *self;
        if let Some(slot) = next.squares.get_mut(pos) {
            *slot = Square::Occupied(player);
        }
        next
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Indices of every empty square, ascending.
    pub fn open_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }
}

impl TryFrom<Vec<Square>> for Board {
    type Error = BoardError;

    #[track_caller]
    fn try_from(squares: Vec<Square>) -> Result<Self, Self::Error> {
        let len = squares.len();
        let squares: [Square; CELLS] = squares
            .try_into()
            .map_err(|_| BoardError::wrong_length(len))?;
        Ok(Self { squares })
    }
}

impl From<Board> for Vec<Square> {
    fn from(board: Board) -> Self {
        board.squares.to_vec()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine comma-separated cells, e.g. `"X,O,,,X,,,,"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares = s
            .split(',')
            .map(|cell| cell.trim().parse())
            .collect::<Result<Vec<Square>, _>>()?;
        Self::try_from(squares)
    }
}

impl fmt::Display for Board {
    /// Renders the board as rows like `X|O|3`, numbering empty cells from 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(player) => write!(f, "{}", player)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardErrorKind;
    use serde_json::json;

    #[test]
    fn test_board_decodes_wire_cells() {
        let board: Board =
            serde_json::from_value(json!(["X", "O", "", "", "X", "", "", "", "O"])).unwrap();
        assert_eq!(board.get(0), Some(Square::Occupied(Player::X)));
        assert_eq!(board.get(8), Some(Square::Occupied(Player::O)));
        assert_eq!(board.open_cells(), vec![2, 3, 5, 6, 7]);
        assert_eq!(
            serde_json::to_value(board).unwrap(),
            json!(["X", "O", "", "", "X", "", "", "", "O"])
        );
    }

    #[test]
    fn test_board_rejects_wrong_length() {
        let err = Board::try_from(vec![Square::Empty; 8]).unwrap_err();
        assert_eq!(err.kind, BoardErrorKind::WrongLength(8));
        assert!(serde_json::from_value::<Board>(json!(["X", "O"])).is_err());
    }

    #[test]
    fn test_board_rejects_unknown_mark() {
        let err = "X,O,Z,,,,,,".parse::<Board>().unwrap_err();
        assert_eq!(err.kind, BoardErrorKind::UnknownMark("Z".to_string()));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new();
        let err = board.set(9, Square::Occupied(Player::X)).unwrap_err();
        assert_eq!(err.kind, BoardErrorKind::OutOfBounds(9));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::new();
        let next = board.with_move(4, Player::O);
        assert!(board.is_empty(4));
        assert_eq!(next.get(4), Some(Square::Occupied(Player::O)));
        assert_eq!(next.open_cells().len(), 8);
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X,,O,,,,,,".parse().unwrap();
        assert_eq!(board.to_string(), "X|2|O\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }
}
