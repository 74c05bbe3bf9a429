use thiserror::Error;

use crate::square::Square;
use crate::types::Player;

/// Errors reported by the rules engine and its adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The square is occupied or captures nothing for the player to move.
    #[error("illegal move {square} for {player}")]
    IllegalMove { square: Square, player: Player },

    /// A move was submitted after the game ended.
    #[error("game is already over")]
    InvalidStateTransition,

    #[error("square index {0} is outside the board (expected 0..=63)")]
    IndexOutOfBounds(usize),

    #[error("row {row}, col {col} is outside the board")]
    CoordinateOutOfBounds { row: usize, col: usize },

    #[error("invalid coordinate {0:?}: expected a column A-H followed by a row 1-8")]
    InvalidCoordinate(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
