//! Rules for noughts and crosses.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the board can evaluate only the lines a move touches
//! while invariant checks can still scan everything.

pub mod draw;
pub mod lines;
pub mod win;

pub use draw::is_full;
pub use lines::{ALL_LINES, Line, LineKind, lines_through};
pub use win::{check_winner, line_winner, winner_through};
