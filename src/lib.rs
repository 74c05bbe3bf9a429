//! Othello/Reversi rules engine.
//!
//! [`GameState`] is the entry point: it lists legal moves, applies them with
//! full capture resolution, skips a player who has no reply, and reports the
//! winner once neither side can move. [`scan`] holds the single ray walk that
//! every legality and capture query is built on. [`env`] and [`wasm`] are thin
//! adapters for agents and JavaScript callers.

pub mod board;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod movegen;
pub mod scan;
pub mod square;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::EnvConfig;
pub use env::{Action, Observation, OthelloEnv, StepResult};
pub use error::RulesError;
pub use game::{GameState, Status, new_game};
pub use square::{Square, SquareSet};
pub use types::{Cell, Outcome, Player};
