//! Error types for the game engine.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
///
/// All kinds are integration errors from the caller: the engine rejects the
/// call and leaves its state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Cell index outside 0-8.
    #[display("Cell {index} is out of range (expected 0-8)")]
    OutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// Cell already holds a mark.
    #[display("Cell {index} is already claimed")]
    AlreadyClaimed {
        /// The rejected index.
        index: usize,
    },

    /// Operation invoked outside the state it is valid in.
    #[display("Cannot {operation} while {state}")]
    InvalidTransition {
        /// The rejected operation.
        operation: &'static str,
        /// The state the round was in.
        state: String,
    },
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// Shorthand for an `InvalidTransition` error.
    #[track_caller]
    pub fn invalid_transition(operation: &'static str, state: impl ToString) -> Self {
        Self::new(GameErrorKind::InvalidTransition {
            operation,
            state: state.to_string(),
        })
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}
