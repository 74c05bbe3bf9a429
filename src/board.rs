use std::fmt;
use std::str::FromStr;

use crate::error::RulesError;
use crate::square::{BOARD_SIZE, NUM_SQUARES, Square, SquareSet};
use crate::types::{Cell, Player};

const COLUMN_HEADER: &str = "  A B C D E F G H";

/// Othello board state represented by two bitboards.
///
/// Bit `i` of each mask is square `i` in row-major order from A1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// A board with no stones.
    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Builds a board from raw masks. The masks must not overlap.
    pub fn from_bitboards(black: u64, white: u64) -> Result<Self, RulesError> {
        if (black & white) != 0 {
            return Err(RulesError::InvalidBoard(format!(
                "black and white stones overlap at {}",
                SquareSet::from_bits(black & white)
            )));
        }
        Ok(Self { black, white })
    }

    pub fn cell(&self, square: Square) -> Cell {
        let mask = square.bit();
        if (self.black & mask) != 0 {
            Cell::Black
        } else if (self.white & mask) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// All stones of one color.
    pub fn stones(&self, player: Player) -> SquareSet {
        match player {
            Player::Black => SquareSet::from_bits(self.black),
            Player::White => SquareSet::from_bits(self.white),
        }
    }

    pub fn empties(&self) -> SquareSet {
        SquareSet::from_bits(!(self.black | self.white))
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, player: Player) -> u8 {
        self.stones(player).len() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (square, cell) in self.squares().zip(board.iter_mut()) {
            *cell = self.cell(square).code();
        }
        board
    }

    /// Cells as seen by `player`: +1 own stone, -1 opponent stone, 0 empty.
    pub fn relative_tokens(&self, player: Player) -> [i8; NUM_SQUARES] {
        let mut tokens = [0i8; NUM_SQUARES];
        for (square, token) in self.squares().zip(tokens.iter_mut()) {
            *token = match self.cell(square).player() {
                Some(owner) if owner == player => 1,
                Some(_) => -1,
                None => 0,
            };
        }
        tokens
    }

    /// Sets `squares` to `player`'s color, flipping any opposing stones there.
    ///
    /// Only the turn engine calls this, with a move square plus its validated flip set.
    pub(crate) fn paint(&mut self, squares: SquareSet, player: Player) {
        let mask = squares.bits();
        match player {
            Player::Black => {
                self.black |= mask;
                self.white &= !mask;
            }
            Player::White => {
                self.white |= mask;
                self.black &= !mask;
            }
        }
    }

    fn squares(&self) -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square::from_index_unchecked)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the grid with column letters and 1-based row numbers.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(COLUMN_HEADER)?;
        for row in 0..BOARD_SIZE {
            write!(f, "\n{}", row + 1)?;
            for col in 0..BOARD_SIZE {
                let square = Square::from_coords(row, col).map_err(|_| fmt::Error)?;
                write!(f, " {}", self.cell(square).glyph())?;
            }
        }
        Ok(())
    }
}

/// Parses 64 cell glyphs in row-major order from A1. Whitespace is ignored.
///
/// Black: `B`, `X`, `●`. White: `W`, `O`, `○`. Empty: `.`, `-`, `□`.
impl FromStr for Board {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::empty();
        let mut index = 0usize;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if index >= NUM_SQUARES {
                return Err(RulesError::InvalidBoard(format!(
                    "expected {NUM_SQUARES} cells, got more"
                )));
            }
            match ch.to_ascii_uppercase() {
                'B' | 'X' | '●' => board.black |= bit(index),
                'W' | 'O' | '○' => board.white |= bit(index),
                '.' | '-' | '□' => {}
                other => {
                    return Err(RulesError::InvalidBoard(format!(
                        "unknown cell glyph {other:?}"
                    )));
                }
            }
            index += 1;
        }

        if index != NUM_SQUARES {
            return Err(RulesError::InvalidBoard(format!(
                "expected {NUM_SQUARES} cells, got {index}"
            )));
        }
        Ok(board)
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}
