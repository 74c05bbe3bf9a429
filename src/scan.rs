//! The directional ray walk shared by every legality and capture query.

use crate::board::Board;
use crate::square::{BOARD_SIZE, Square, SquareSet};
use crate::types::{Cell, Player};

/// One of the eight compass directions, as a `(row, col)` unit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Row and column delta. North is towards row 1.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// What a single ray found for the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult {
    /// No capture along this ray.
    Blocked,
    /// The opposing stones bracketed between the origin and a mover stone.
    Captured(SquareSet),
}

/// Walks from `origin` (exclusive) along `direction`, classifying the ray for `mover`.
///
/// The ray captures only if it starts with one or more opposing stones and is
/// closed by a mover stone. Empty cells and the board edge block it. The
/// origin cell itself is not inspected.
pub fn scan(board: &Board, origin: Square, direction: Direction, mover: Player) -> ScanResult {
    let (dr, dc) = direction.delta();
    let opponent = mover.opponent().cell();
    let own = mover.cell();
    let mut line = SquareSet::EMPTY;

    for step in 1..BOARD_SIZE as i8 {
        let Some(square) = origin.offset(dr, dc, step) else {
            return ScanResult::Blocked;
        };

        match board.cell(square) {
            cell if cell == opponent => line.insert(square),
            cell if cell == own && !line.is_empty() => return ScanResult::Captured(line),
            _ => return ScanResult::Blocked,
        }
    }

    ScanResult::Blocked
}

/// Every stone `mover` would flip by playing at `origin`, excluding `origin` itself.
///
/// Returns an empty set when `origin` is occupied.
pub fn flips(board: &Board, origin: Square, mover: Player) -> SquareSet {
    if board.cell(origin) != Cell::Empty {
        return SquareSet::EMPTY;
    }

    Direction::ALL
        .into_iter()
        .filter_map(|direction| match scan(board, origin, direction, mover) {
            ScanResult::Captured(line) => Some(line),
            ScanResult::Blocked => None,
        })
        .fold(SquareSet::EMPTY, SquareSet::union)
}

/// Whether `mover` may play at `origin`: it is empty and captures in some direction.
pub fn is_legal(board: &Board, origin: Square, mover: Player) -> bool {
    board.cell(origin) == Cell::Empty
        && Direction::ALL
            .into_iter()
            .any(|direction| matches!(scan(board, origin, direction, mover), ScanResult::Captured(_)))
}
