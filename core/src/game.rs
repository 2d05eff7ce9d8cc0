//! Per-day game state and its transition function.
//!
//! RULE: GameState is a plain value. The only way to move a game forward
//! is `submit_guess`, which returns the next state instead of mutating.
//! Every state that can be deserialized satisfies the invariants below:
//!   - guesses.len() <= max_guesses
//!   - solved == guesses.contains(solution)
//!   - max_guesses > 0

use crate::{roster::AuthorRoster, types::AuthorName};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUMBER_OF_GUESSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    solution:    AuthorName,
    guesses:     Vec<AuthorName>,
    solved:      bool,
    max_guesses: usize,
}

/// Why a submission left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownAuthor,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced(GameState),
    Ignored(IgnoreReason),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameStateError {
    #[error("max_guesses must be positive")]
    NoGuessesAllowed,

    #[error("{count} guesses recorded but only {max} allowed")]
    TooManyGuesses { count: usize, max: usize },

    #[error("solved flag is {solved} but the solution was guessed: {guessed}")]
    SolvedMismatch { solved: bool, guessed: bool },
}

impl GameState {
    /// A fresh game. `max_guesses` below 1 is raised to 1, so a game built
    /// from an unchecked config still allows one attempt.
    pub fn new(solution: impl Into<AuthorName>, max_guesses: usize) -> Self {
        Self {
            solution: solution.into(),
            guesses: Vec::new(),
            solved: false,
            max_guesses: max_guesses.max(1),
        }
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn guesses(&self) -> &[AuthorName] {
        &self.guesses
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn guesses_left(&self) -> usize {
        self.max_guesses - self.guesses.len()
    }

    pub fn status(&self) -> GameStatus {
        if self.solved {
            GameStatus::Won
        } else if self.guesses.len() >= self.max_guesses {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Apply one guess. Unknown names and finished games are ignored;
    /// repeated guesses are accepted and use up an attempt.
    pub fn submit_guess(&self, name: &str, roster: &AuthorRoster) -> Transition {
        if self.status().is_terminal() {
            return Transition::Ignored(IgnoreReason::GameOver);
        }
        if !roster.contains(name) {
            return Transition::Ignored(IgnoreReason::UnknownAuthor);
        }

        let mut next = self.clone();
        next.guesses.push(name.to_string());
        if name == next.solution {
            next.solved = true;
        }
        Transition::Advanced(next)
    }
}

/// Wire shape of a stored game, checked before it becomes a `GameState`.
#[derive(Deserialize)]
struct RawGameState {
    solution:    AuthorName,
    guesses:     Vec<AuthorName>,
    solved:      bool,
    max_guesses: usize,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameStateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        if raw.max_guesses == 0 {
            return Err(GameStateError::NoGuessesAllowed);
        }
        if raw.guesses.len() > raw.max_guesses {
            return Err(GameStateError::TooManyGuesses {
                count: raw.guesses.len(),
                max:   raw.max_guesses,
            });
        }
        let guessed = raw.guesses.iter().any(|g| *g == raw.solution);
        if guessed != raw.solved {
            return Err(GameStateError::SolvedMismatch { solved: raw.solved, guessed });
        }
        Ok(Self {
            solution:    raw.solution,
            guesses:     raw.guesses,
            solved:      raw.solved,
            max_guesses: raw.max_guesses,
        })
    }
}
