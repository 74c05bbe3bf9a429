//! Legal move enumeration on top of the line scanner.

use crate::board::Board;
use crate::scan;
use crate::square::SquareSet;
use crate::types::Player;

/// Returns every empty square where `mover` captures at least one stone.
///
/// An empty set means `mover` must pass.
pub fn legal_moves(board: &Board, mover: Player) -> SquareSet {
    board
        .empties()
        .filter(|&square| scan::is_legal(board, square, mover))
        .collect()
}

/// Whether `mover` has any legal move. Stops at the first one found.
pub fn has_any_move(board: &Board, mover: Player) -> bool {
    board
        .empties()
        .any(|square| scan::is_legal(board, square, mover))
}
