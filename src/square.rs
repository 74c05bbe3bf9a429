//! Board addressing: [`Square`] for a single cell and [`SquareSet`] for masks of cells.
//!
//! Squares are numbered row-major from A1 (`index = row * 8 + col`), and bit `i`
//! of a [`SquareSet`] corresponds to square `i`.

use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

use crate::error::RulesError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const COLUMNS: &str = "ABCDEFGH";

/// A single cell on the board, always in `0..64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Square from a linear index.
    pub fn new(index: usize) -> Result<Self, RulesError> {
        if index >= NUM_SQUARES {
            return Err(RulesError::IndexOutOfBounds(index));
        }
        Ok(Self(index as u8))
    }

    /// Square from zero-based row and column.
    pub fn from_coords(row: usize, col: usize) -> Result<Self, RulesError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(RulesError::CoordinateOutOfBounds { row, col });
        }
        Ok(Self((row * BOARD_SIZE + col) as u8))
    }

    /// Caller guarantees `index < 64`.
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    pub fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// One-hot mask of this square.
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// The square `steps` cells away along `(dr, dc)`, if it is on the board.
    pub(crate) fn offset(self, dr: i8, dc: i8, steps: i8) -> Option<Self> {
        let row = self.row() as i8 + dr * steps;
        let col = self.col() as i8 + dc * steps;
        if in_bounds(row, col) {
            Some(Self((row as u8) * BOARD_SIZE as u8 + col as u8))
        } else {
            None
        }
    }
}

fn in_bounds(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col)
}

impl TryFrom<usize> for Square {
    type Error = RulesError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Square> for usize {
    fn from(square: Square) -> Self {
        square.index()
    }
}

/// Algebraic notation: column letter then 1-based row ("D3").
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col = COLUMNS.chars().nth(self.col()).ok_or(fmt::Error)?;
        f.write_char(col)?;
        write!(f, "{}", self.row() + 1)
    }
}

/// Parses algebraic notation, case-insensitive ("D3", "h8").
impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RulesError::InvalidCoordinate(s.to_string());
        let mut chars = s.trim().chars();

        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        if chars.next().is_some() || digit == 0 {
            return Err(invalid());
        }

        let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        let row = digit as usize - 1;
        Self::from_coords(row, col)
    }
}

/// A set of squares stored as a 64-bit mask.
///
/// Iterating yields squares in ascending index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, square: Square) -> bool {
        (self.0 & square.bit()) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest-index member, if any.
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Linear indices of all members, ascending.
    pub fn to_indices(self) -> Vec<u8> {
        self.map(|square| square.0).collect()
    }
}

impl Iterator for SquareSet {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let square = self.first()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = SquareSet::len(*self);
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareSet {}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl From<Square> for SquareSet {
    fn from(square: Square) -> Self {
        Self(square.bit())
    }
}

impl Display for SquareSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let set = *self;
        let names = set
            .map(|square| square.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[{names}]")
    }
}
