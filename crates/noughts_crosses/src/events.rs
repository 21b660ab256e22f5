//! Events emitted to the display.

use crate::score::ScoreSnapshot;
use crate::types::{Outcome, Side};
use serde::{Deserialize, Serialize};

/// Shown when the countdown reaches the hurry threshold.
pub const HURRY_MESSAGE: &str = "Hurry!! Time's Almost Up!!!";

/// Shown when a round ends with a full board.
pub const DRAW_MESSAGE: &str = "No One Won";

/// "Nought's Turn..."
pub fn turn_message(side: Side) -> String {
    format!("{side}'s Turn...")
}

/// "Noughts Win!!"
pub fn win_message(side: Side) -> String {
    format!("{} Win!!", side.plural())
}

/// "Noughts took too long"
pub fn too_slow_message(side: Side) -> String {
    format!("{} took too long", side.plural())
}

/// Countdown as shown on the clock, e.g. `00:10`, `00:07`.
pub fn countdown_text(remaining: u32) -> String {
    format!("00:{remaining:02}")
}

/// What the display should show next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// Headline text: whose turn it is, who won, or who ran out of time.
    Status(String),
    /// Scores after a change (and once when a round opens).
    Scores(ScoreSnapshot),
    /// Clock update for the side on turn.
    Countdown {
        /// Side on the clock.
        side: Side,
        /// Ticks left.
        remaining: u32,
    },
    /// The side on turn is nearly out of time.
    Hurry {
        /// Side on the clock.
        side: Side,
        /// Ticks left.
        remaining: u32,
    },
    /// A cell took a mark.
    CellClaimed {
        /// Cell index, 0-8.
        index: usize,
        /// Side that claimed it.
        side: Side,
    },
    /// The round is over; the board is frozen.
    RoundOver(Outcome),
    /// A restart was accepted; the next round opens with `first_mover`.
    RestartRequested {
        /// Side that plays first next round.
        first_mover: Side,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Status(text) => write!(f, "{text}"),
            GameEvent::Scores(snapshot) => write!(f, "{snapshot}"),
            GameEvent::Countdown { remaining, .. } => write!(f, "{}", countdown_text(*remaining)),
            GameEvent::Hurry { .. } => write!(f, "{HURRY_MESSAGE}"),
            GameEvent::CellClaimed { index, side } => write!(f, "{side} takes cell {}", index + 1),
            GameEvent::RoundOver(outcome) => write!(f, "Round over: {outcome}"),
            GameEvent::RestartRequested { first_mover } => {
                write!(f, "New round, {} go first", first_mover.plural())
            }
        }
    }
}
