//! Core domain types for noughts and crosses.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Side {
    /// Noughts (plays first in the opening round).
    Nought,
    /// Crosses.
    Cross,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Nought => Side::Cross,
            Side::Cross => Side::Nought,
        }
    }

    /// Plural name used in outcome messages ("Noughts", "Crosses").
    pub fn plural(self) -> &'static str {
        match self {
            Side::Nought => "Noughts",
            Side::Cross => "Crosses",
        }
    }

    /// Single-character mark drawn on the board.
    pub fn symbol(self) -> char {
        match self {
            Side::Nought => 'O',
            Side::Cross => 'X',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Unclaimed.
    #[default]
    Empty,
    /// Claimed by a side. Never changes again within a round.
    Claimed(Side),
}

impl Cell {
    /// Returns the owning side, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Claimed(side) => Some(side),
        }
    }

    /// Returns true if nobody has claimed this cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Status of a round as seen by the board evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Round is ongoing.
    InProgress,
    /// Noughts completed a line.
    NoughtWon,
    /// Crosses completed a line.
    CrossWon,
    /// Board filled with no line completed.
    Draw,
}

impl GameStatus {
    /// Status for a win by `side`.
    #[instrument]
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Nought => GameStatus::NoughtWon,
            Side::Cross => GameStatus::CrossWon,
        }
    }

    /// Returns the winning side if the round was won.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::NoughtWon => Some(Side::Nought),
            GameStatus::CrossWon => Some(Side::Cross),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    /// Returns true for any status other than `InProgress`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Converts a terminal status into an outcome.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::NoughtWon => Some(Outcome::Winner(Side::Nought)),
            GameStatus::CrossWon => Some(Outcome::Winner(Side::Cross)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A side won, by line or by the opponent's forfeit.
    Winner(Side),
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(*side),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// The equivalent terminal status.
    pub fn status(&self) -> GameStatus {
        match self {
            Outcome::Winner(side) => GameStatus::won_by(*side),
            Outcome::Draw => GameStatus::Draw,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{} win", side.plural()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Side::Nought.opponent(), Side::Cross);
        assert_eq!(Side::Cross.opponent(), Side::Nought);
    }

    #[test]
    fn test_status_and_outcome_agree() {
        for side in [Side::Nought, Side::Cross] {
            let status = GameStatus::won_by(side);
            assert_eq!(status.winner(), Some(side));
            assert_eq!(status.outcome(), Some(Outcome::Winner(side)));
            assert_eq!(Outcome::Winner(side).status(), status);
        }
        assert_eq!(GameStatus::InProgress.outcome(), None);
        assert!(GameStatus::Draw.outcome().is_some_and(|o| o.is_draw()));
    }
}
