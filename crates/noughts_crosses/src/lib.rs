//! Noughts and crosses engine.
//!
//! Two sides take turns on a 3x3 board against a per-turn countdown. A side
//! that completes a row, column or diagonal wins; a side whose countdown runs
//! out forfeits. Scores and the first-mover flag live in a [`ScoreStore`]
//! that outlives each round.
//!
//! # Architecture
//!
//! - **Board**: cells, claiming, and win/draw evaluation through the last move
//! - **TurnTimer**: countdown ticked by the caller, with generation-tagged expiry
//! - **GameController**: the round state machine, borrowing the session's store
//! - **Session**: owns the store and opens rounds
//!
//! # Example
//!
//! ```
//! use noughts_crosses::{GameStatus, Session, TimerConfig};
//!
//! let mut session = Session::new(TimerConfig::default()).unwrap();
//! let mut round = session.new_round();
//! for cell in [0, 3, 1, 4, 2] {
//!     round.play_move(cell).unwrap();
//! }
//! assert_eq!(round.status(), GameStatus::NoughtWon);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod controller;
mod error;
mod events;
pub mod invariants;
mod position;
pub mod rules;
mod score;
mod session;
mod timer;
mod types;

pub use board::{Board, CELL_COUNT};
pub use config::{ConfigError, TimerConfig};
pub use controller::{GameController, RoundState};
pub use error::{GameError, GameErrorKind};
pub use events::{
    DRAW_MESSAGE, GameEvent, HURRY_MESSAGE, countdown_text, too_slow_message, turn_message,
    win_message,
};
pub use position::Position;
pub use score::{ScoreSnapshot, ScoreStore};
pub use session::Session;
pub use timer::{Expiry, TimerSignal, TurnTimer, TurnTimerState};
pub use types::{Cell, GameStatus, Outcome, Side};
