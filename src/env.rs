//! Reinforcement-learning style environment over the rules engine.
//!
//! The environment only translates actions, observations and rewards; every
//! rule decision is made by [`GameState`].

use std::fmt::{self, Write};

use log::debug;
use serde::Serialize;

use crate::config::EnvConfig;
use crate::error::RulesError;
use crate::game::GameState;
use crate::square::{BOARD_SIZE, NUM_SQUARES, Square};
use crate::types::{Outcome, Player};

/// Number of discrete actions: one per square.
pub const ACTION_SPACE: usize = NUM_SQUARES;

/// Observation shape: rows, columns, planes.
pub const OBSERVATION_SHAPE: (usize, usize, usize) = (BOARD_SIZE, BOARD_SIZE, 2);

const LEGAL_GLYPH: char = '□';
const ILLEGAL_GLYPH: char = '☒';

/// A move as supplied by an agent or a human.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Index(usize),
    Notation(String),
}

impl Action {
    pub fn to_square(&self) -> Result<Square, RulesError> {
        match self {
            Action::Index(index) => Square::new(*index),
            Action::Notation(text) => text.parse(),
        }
    }
}

impl From<usize> for Action {
    fn from(index: usize) -> Self {
        Action::Index(index)
    }
}

impl From<Square> for Action {
    fn from(square: Square) -> Self {
        Action::Index(square.index())
    }
}

impl From<&str> for Action {
    fn from(text: &str) -> Self {
        Action::Notation(text.to_string())
    }
}

impl From<String> for Action {
    fn from(text: String) -> Self {
        Action::Notation(text)
    }
}

/// Board planes as seen by the player to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// +1 own stone, -1 opponent stone, 0 empty.
    pub position: [[i8; BOARD_SIZE]; BOARD_SIZE],
    /// 1 where the player to move has a legal move.
    pub legal: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Observation,
    /// From the perspective of the player who just moved:
    /// +1 win, -1 loss, 0 for a draw or an unfinished game.
    ///
    /// Agents trained against a 1/0 reward (1 for a win, 0 otherwise,
    /// losses included) see losses as -1 here.
    pub reward: f32,
    pub done: bool,
    /// The opponent had no reply, so the same player moves again.
    pub passed: bool,
}

pub struct OthelloEnv {
    config: EnvConfig,
    state: GameState,
}

impl OthelloEnv {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            config,
            state: GameState::new(),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    /// Starts a new game and returns its first observation.
    pub fn reset(&mut self) -> Observation {
        self.state = GameState::new();
        debug!("---- NEW GAME ----");
        self.observation()
    }

    /// Plays `action` for the player to move.
    ///
    /// The environment is left untouched when the action is rejected.
    pub fn step(&mut self, action: impl Into<Action>) -> Result<StepResult, RulesError> {
        let square = action.into().to_square()?;
        let mover = self.state.current_player();
        let next = self.state.apply_move(square)?;
        self.state = next;

        let reward = match next.winner() {
            Some(Outcome::Winner(winner)) if winner == mover => 1.0,
            Some(Outcome::Winner(_)) => -1.0,
            Some(Outcome::Draw) | None => 0.0,
        };
        if let Some(outcome) = next.winner() {
            let (black, white) = next.score();
            debug!("{outcome} with {black} to {white}");
        }

        Ok(StepResult {
            observation: self.observation(),
            reward,
            done: next.is_terminal(),
            passed: next.passed(),
        })
    }

    pub fn observation(&self) -> Observation {
        let tokens = self.state.board().relative_tokens(self.state.current_player());
        let mask = self.legal_action_mask();

        let mut observation = Observation {
            position: [[0; BOARD_SIZE]; BOARD_SIZE],
            legal: [[0; BOARD_SIZE]; BOARD_SIZE],
        };
        for index in 0..NUM_SQUARES {
            let (row, col) = (index / BOARD_SIZE, index % BOARD_SIZE);
            observation.position[row][col] = tokens[index];
            observation.legal[row][col] = u8::from(mask[index]);
        }
        observation
    }

    pub fn legal_action_mask(&self) -> [bool; ACTION_SPACE] {
        let mut mask = [false; ACTION_SPACE];
        for square in self.state.legal_moves() {
            mask[square.index()] = true;
        }
        mask
    }

    /// Legal moves in algebraic notation, ascending by index.
    pub fn legal_actions(&self) -> Vec<String> {
        self.state
            .legal_moves()
            .map(|square| square.to_string())
            .collect()
    }

    /// Text view of the game. Also written to the log when `log_renders` is set.
    pub fn render(&self) -> String {
        let out = Render(self).to_string();

        if self.config.log_renders {
            for line in out.lines() {
                debug!("{line}");
            }
        }
        out
    }
}

struct Render<'a>(&'a OthelloEnv);

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = self.0;

        if env.is_done() {
            f.write_str("Game over.\n")?;
        } else {
            let player = env.current_player();
            writeln!(
                f,
                "It is Player {}'s turn to move ({player})",
                player.cell().glyph()
            )?;
        }

        writeln!(f, "\nBoard:\n{}", env.state.board())?;

        if env.config.verbose {
            let mask = env.legal_action_mask();
            f.write_str("\nMoves:\n  A B C D E F G H")?;
            for row in 0..BOARD_SIZE {
                write!(f, "\n{}", row + 1)?;
                for col in 0..BOARD_SIZE {
                    let glyph = if mask[row * BOARD_SIZE + col] {
                        LEGAL_GLYPH
                    } else {
                        ILLEGAL_GLYPH
                    };
                    write!(f, " {glyph}")?;
                }
            }
            f.write_char('\n')?;
        }

        if !env.is_done() {
            write!(f, "\nLegal actions: {}", env.state.legal_moves())?;
        }
        Ok(())
    }
}

impl Default for OthelloEnv {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_observation_is_from_black_perspective() {
        let mut env = OthelloEnv::default();

        let observation = env.reset();

        assert_eq!(observation.position[3][3], -1); // d4 white
        assert_eq!(observation.position[3][4], 1); // e4 black
        assert_eq!(observation.legal[2][3], 1); // d3
        assert_eq!(observation.legal[0][0], 0);
        assert_eq!(env.legal_action_mask().iter().filter(|&&legal| legal).count(), 4);
        assert_eq!(env.legal_actions(), vec!["D3", "C4", "F5", "E6"]);
    }

    #[test]
    fn step_accepts_index_and_notation() {
        let mut env = OthelloEnv::default();

        let first = env.step("D3").unwrap();
        assert_eq!(first.reward, 0.0);
        assert!(!first.done);
        assert!(!first.passed);
        assert_eq!(env.current_player(), Player::White);
        // White's view: the stones black just placed are opponent stones.
        assert_eq!(first.observation.position[2][3], -1);

        let second = env.step(18usize).unwrap(); // c3
        assert!(!second.done);
        assert_eq!(env.current_player(), Player::Black);
        assert_eq!(env.state().turn(), 2);
    }

    #[test]
    fn rejected_step_leaves_env_unchanged() {
        let mut env = OthelloEnv::default();
        let before = *env.state();

        assert!(matches!(env.step("A1"), Err(RulesError::IllegalMove { .. })));
        assert_eq!(env.step(99usize), Err(RulesError::IndexOutOfBounds(99)));
        assert_eq!(*env.state(), before);
    }

    #[test]
    fn render_shows_board_and_legal_actions() {
        let env = OthelloEnv::new(EnvConfig {
            verbose: true,
            log_renders: false,
        });

        let text = env.render();

        assert!(text.starts_with("It is Player ●'s turn to move (Black)"));
        assert!(text.contains("4 □ □ □ ○ ● □ □ □"));
        assert!(text.contains("Moves:"));
        assert!(text.contains("3 ☒ ☒ ☒ □ ☒ ☒ ☒ ☒"));
        assert!(text.ends_with("Legal actions: [D3, C4, F5, E6]"));
    }
}
