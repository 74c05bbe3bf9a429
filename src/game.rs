//! Turn engine: move application, forced passes, termination and scoring.

use log::{debug, trace};

use crate::board::Board;
use crate::error::RulesError;
use crate::movegen;
use crate::scan;
use crate::square::{Square, SquareSet};
use crate::types::{GameResult, GameSnapshot, Outcome, Player};

/// Whether the game can still be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Playing,
    GameOver(Outcome),
}

/// The complete state of one game.
///
/// A plain value: [`GameState::apply_move`] returns the successor state and never
/// touches `self`, so independent games never share anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    turn: u32,
    status: Status,
    last_move: Option<Square>,
    flipped: SquareSet,
    passed: bool,
}

/// Starts a game from the standard position with Black to move.
pub fn new_game() -> GameState {
    GameState::new()
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            turn: 0,
            status: Status::Playing,
            last_move: None,
            flipped: SquareSet::EMPTY,
            passed: false,
        }
    }

    /// Builds a state from an arbitrary position.
    ///
    /// If `to_move` has no legal move the turn goes to the other player, and if
    /// neither can move the state is already over.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let (current_player, status) = if movegen::has_any_move(&board, to_move) {
            (to_move, Status::Playing)
        } else if movegen::has_any_move(&board, to_move.opponent()) {
            (to_move.opponent(), Status::Playing)
        } else {
            (to_move, Status::GameOver(final_outcome(&board)))
        };

        Self {
            board,
            current_player,
            turn: 0,
            status,
            last_move: None,
            flipped: SquareSet::EMPTY,
            passed: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move. After game over this is the player who moved last.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of moves applied since the game started.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn last_move(&self) -> Option<Square> {
        self.last_move
    }

    /// Stones flipped by the last move, excluding the placed stone.
    pub fn flipped(&self) -> SquareSet {
        self.flipped
    }

    /// `true` when the last move left the opponent without a reply, so the same
    /// player moves again. Always `false` while [`GameState::last_move`] is `None`.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Legal moves for the current player. Empty once the game is over.
    pub fn legal_moves(&self) -> SquareSet {
        match self.status {
            Status::Playing => movegen::legal_moves(&self.board, self.current_player),
            Status::GameOver(_) => SquareSet::EMPTY,
        }
    }

    pub fn is_legal(&self, square: Square) -> bool {
        self.status == Status::Playing && scan::is_legal(&self.board, square, self.current_player)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::GameOver(_))
    }

    /// The outcome once the game is over, `None` while it is still being played.
    pub fn winner(&self) -> Option<Outcome> {
        match self.status {
            Status::Playing => None,
            Status::GameOver(outcome) => Some(outcome),
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.board.count()
    }

    /// Plays `square` for the current player and returns the resulting state.
    ///
    /// Fails without producing a state if the game is over or the move is not
    /// in [`GameState::legal_moves`].
    pub fn apply_move(&self, square: Square) -> Result<Self, RulesError> {
        if self.is_terminal() {
            return Err(RulesError::InvalidStateTransition);
        }

        let mover = self.current_player;
        let flips = scan::flips(&self.board, square, mover);
        if flips.is_empty() {
            return Err(RulesError::IllegalMove {
                square,
                player: mover,
            });
        }

        let mut board = self.board;
        board.paint(flips.union(SquareSet::from(square)), mover);
        trace!("{mover} plays {square}, flipping {flips}");

        let opponent = mover.opponent();
        let (current_player, status, passed) = if movegen::has_any_move(&board, opponent) {
            (opponent, Status::Playing, false)
        } else if movegen::has_any_move(&board, mover) {
            debug!("{opponent} has no reply to {square}; {mover} moves again");
            (mover, Status::Playing, true)
        } else {
            let outcome = final_outcome(&board);
            let (black, white) = board.count();
            debug!("game over after {square}: {outcome} ({black}-{white})");
            (mover, Status::GameOver(outcome), false)
        };

        Ok(Self {
            board,
            current_player,
            turn: self.turn + 1,
            status,
            last_move: Some(square),
            flipped: flips,
            passed,
        })
    }

    /// Like [`GameState::apply_move`], addressing the move by linear index.
    pub fn apply_index(&self, index: usize) -> Result<Self, RulesError> {
        self.apply_move(Square::new(index)?)
    }

    /// Like [`GameState::apply_move`], addressing the move in algebraic notation ("D3").
    pub fn apply_notation(&self, notation: &str) -> Result<Self, RulesError> {
        self.apply_move(notation.parse()?)
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        let (black_count, white_count) = self.board.count();
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count,
            white_count,
            turn: self.turn,
            is_game_over: self.is_terminal(),
            is_pass: self.passed,
            last_move: self.last_move.map(|square| square.index() as u8),
            flipped: self.flipped.to_indices(),
        }
    }

    /// Final counts and winner. `None` while the game is still being played.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let outcome = self.winner()?;
        let (black_count, white_count) = self.board.count();
        Some(GameResult {
            winner: outcome.code(),
            black_count,
            white_count,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn final_outcome(board: &Board) -> Outcome {
    let (black, white) = board.count();
    Outcome::from_counts(black, white)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const FULL_BOARD: u64 = u64::MAX;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * 8 + col)
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = new_game();

        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.score(), (2, 2));
        assert_eq!(game.turn(), 0);
        assert_eq!(game.status(), Status::Playing);
        assert!(!game.passed());
        assert!(game.flipped().is_empty());
        assert_eq!(game.winner(), None);
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn d3_flips_exactly_d4() {
        let game = new_game();

        let next = game.apply_notation("D3").unwrap();

        assert_eq!(next.flipped(), SquareSet::from(sq("D4")));
        assert_eq!(next.last_move(), Some(sq("D3")));
        assert_eq!(next.current_player(), Player::White);
        assert_eq!(next.turn(), 1);
        assert_eq!(next.score(), (4, 1));
        for index in 0..64 {
            let square = Square::new(index).unwrap();
            let expected = match index {
                19 | 27 | 28 | 35 => Cell::Black,
                36 => Cell::White,
                _ => Cell::Empty,
            };
            assert_eq!(next.board().cell(square), expected, "{square}");
        }
    }

    #[test]
    fn illegal_move_returns_error_and_keeps_state() {
        let game = new_game();
        let before = game;
        assert!(game.is_legal(sq("D3")));
        assert!(!game.is_legal(sq("A1")));

        let err = game.apply_move(sq("A1")).unwrap_err();
        assert_eq!(
            err,
            RulesError::IllegalMove {
                square: sq("A1"),
                player: Player::Black
            }
        );

        let occupied = game.apply_move(sq("D4")).unwrap_err();
        assert!(matches!(occupied, RulesError::IllegalMove { .. }));
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_range_addresses_are_rejected() {
        let game = new_game();

        assert_eq!(game.apply_index(64), Err(RulesError::IndexOutOfBounds(64)));
        assert!(matches!(
            game.apply_notation("J4"),
            Err(RulesError::CoordinateOutOfBounds { .. })
        ));
        assert!(matches!(
            game.apply_notation("nonsense"),
            Err(RulesError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn opponent_without_reply_is_skipped() {
        // White takes h1 by flipping g1; black then has no move but white can still play c8.
        let board: Board = "
            WWWWWWB.
            ........
            ........
            ........
            ........
            ........
            ........
            WB......"
            .parse()
            .unwrap();
        let game = GameState::from_board(board, Player::White);
        assert_eq!(game.current_player(), Player::White);

        let next = game.apply_notation("H1").unwrap();

        assert_eq!(next.flipped(), SquareSet::from(sq("G1")));
        assert!(!movegen::has_any_move(next.board(), Player::Black));
        assert_eq!(next.status(), Status::Playing);
        assert!(next.passed());
        assert_eq!(next.current_player(), Player::White);
        assert_eq!(next.legal_moves(), SquareSet::from(sq("C8")));
    }

    #[test]
    fn full_board_after_move_sets_game_over() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let game = GameState::from_board(Board::from_bitboards(black, white).unwrap(), Player::Black);

        // Black cannot move, so white is to move from the start.
        assert_eq!(game.current_player(), Player::White);
        assert!(!game.passed());

        let next = game.apply_index(0).unwrap();

        assert!(next.is_terminal());
        assert_eq!(next.score(), (0, 64));
        assert_eq!(next.winner(), Some(Outcome::Winner(Player::White)));
        assert_eq!(next.flipped().to_indices(), vec![1]);
        assert!(next.legal_moves().is_empty());
        assert_eq!(
            next.apply_index(0),
            Err(RulesError::InvalidStateTransition)
        );
    }

    #[test]
    fn exhausted_board_with_equal_counts_is_a_draw() {
        let black = 0x0000_0000_FFFF_FFFF;
        let white = !black;
        let game = GameState::from_board(Board::from_bitboards(black, white).unwrap(), Player::Black);

        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(Outcome::Draw));
        assert_eq!(
            game.to_game_result(),
            Some(GameResult {
                winner: 0,
                black_count: 32,
                white_count: 32
            })
        );
    }

    #[test]
    fn blocked_position_with_empties_ends_with_majority_winner() {
        // Neither side can bracket anything, even though cells are empty.
        let board: Board = "
            BBB.....
            ........
            ........
            ........
            ........
            ........
            ........
            ......WW"
            .parse()
            .unwrap();
        let game = GameState::from_board(board, Player::White);

        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(Outcome::Winner(Player::Black)));
        assert_eq!(game.to_game_result().map(|r| r.winner), Some(1));
    }

    #[test]
    fn legal_moves_query_is_idempotent() {
        let game = new_game().apply_notation("F5").unwrap();

        let first = game.legal_moves();
        let second = game.legal_moves();

        assert_eq!(first, second);
        assert_eq!(game, new_game().apply_notation("F5").unwrap());
    }

    #[test]
    fn skipped_side_in_from_board_is_not_reported_as_pass() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let game = GameState::from_board(Board::from_bitboards(black, white).unwrap(), Player::Black);

        let snapshot = game.to_snapshot();

        assert_eq!(snapshot.current_player, 2);
        assert_eq!(snapshot.last_move, None);
        assert!(!snapshot.is_pass);
        assert!(snapshot.flipped.is_empty());
    }

    #[test]
    fn snapshot_reports_last_move() {
        let game = new_game().apply_notation("D3").unwrap();
        let snapshot = game.to_snapshot();

        assert_eq!(snapshot.current_player, 2);
        assert_eq!(snapshot.black_count, 4);
        assert_eq!(snapshot.white_count, 1);
        assert_eq!(snapshot.turn, 1);
        assert!(!snapshot.is_game_over);
        assert!(!snapshot.is_pass);
        assert_eq!(snapshot.last_move, Some(19));
        assert_eq!(snapshot.flipped, vec![27]);
        assert_eq!(snapshot.board[19], 1);
        assert!(game.to_game_result().is_none());
    }
}
