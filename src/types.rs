use std::fmt;

use serde::Serialize;

pub const PLAYER_NONE: u8 = 0;
pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire code used by snapshots: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => PLAYER_NONE,
            Cell::Black => PLAYER_BLACK,
            Cell::White => PLAYER_WHITE,
        }
    }

    /// Owner of the stone, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '□',
            Cell::Black => '●',
            Cell::White => '○',
        }
    }
}

/// One of the two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Player {
    #[default]
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The cell color this player places.
    pub fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Signed token value: +1 for black, -1 for white.
    pub fn token(self) -> i8 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    pub fn code(self) -> u8 {
        self.cell().code()
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    /// Decides the outcome from final stone counts.
    pub fn from_counts(black: u8, white: u8) -> Self {
        if black > white {
            Outcome::Winner(Player::Black)
        } else if white > black {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Outcome::Winner(player) => player.code(),
            Outcome::Draw => PLAYER_NONE,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player} wins"),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub turn: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the last move left the opponent without a reply,
    ///   so `current_player` moves again.
    /// - `false` otherwise, including before the first move.
    pub is_pass: bool,
    pub last_move: Option<u8>,
    /// Squares flipped by the last move (0..=63), excluding the placed stone.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0=draw, 1=black, 2=white.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_maps_to_cell_and_token() {
        assert_eq!(Player::Black.cell(), Cell::Black);
        assert_eq!(Player::White.cell(), Cell::White);
        assert_eq!(Player::Black.token(), 1);
        assert_eq!(Player::White.token(), -1);
        assert_eq!(!Player::Black, Player::White);
        assert_eq!(Cell::White.player(), Some(Player::White));
        assert_eq!(Cell::Empty.player(), None);
    }

    #[test]
    fn outcome_from_counts_prefers_strict_majority() {
        assert_eq!(Outcome::from_counts(33, 31), Outcome::Winner(Player::Black));
        assert_eq!(Outcome::from_counts(10, 54), Outcome::Winner(Player::White));
        assert_eq!(Outcome::from_counts(32, 32), Outcome::Draw);
        assert_eq!(Outcome::Draw.code(), PLAYER_NONE);
    }
}
