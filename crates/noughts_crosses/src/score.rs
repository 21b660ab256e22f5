//! Scores and first-mover alternation carried across rounds.

use crate::types::Side;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Session-wide state that outlives each round's board.
///
/// Counters only ever go up. The first-mover flag flips once per restart so
/// the side that waited last round opens the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ScoreStore {
    /// Rounds won by noughts.
    nought_points: u32,
    /// Rounds won by crosses.
    cross_points: u32,
    /// Whether noughts open the next round.
    noughts_go_first_next: bool,
}

impl ScoreStore {
    /// Creates a fresh store: no points, noughts first.
    pub fn new() -> Self {
        Self {
            nought_points: 0,
            cross_points: 0,
            noughts_go_first_next: true,
        }
    }

    /// Adds a point for noughts.
    #[instrument(skip(self))]
    pub fn increment_nought(&mut self) {
        self.nought_points += 1;
        info!(nought_points = self.nought_points, "Noughts scored");
    }

    /// Adds a point for crosses.
    #[instrument(skip(self))]
    pub fn increment_cross(&mut self) {
        self.cross_points += 1;
        info!(cross_points = self.cross_points, "Crosses scored");
    }

    /// Adds a point for `side`.
    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Nought => self.increment_nought(),
            Side::Cross => self.increment_cross(),
        }
    }

    /// Hands the opening move to the other side.
    #[instrument(skip(self))]
    pub fn toggle_first_mover(&mut self) {
        self.noughts_go_first_next = !self.noughts_go_first_next;
        info!(first_mover = %self.current_first_mover(), "First mover toggled");
    }

    /// The side that opens the next round.
    pub fn current_first_mover(&self) -> Side {
        if self.noughts_go_first_next {
            Side::Nought
        } else {
            Side::Cross
        }
    }

    /// Points for `side`.
    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::Nought => self.nought_points,
            Side::Cross => self.cross_points,
        }
    }

    /// Current scores for display.
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            nought_points: self.nought_points,
            cross_points: self.cross_points,
        }
    }
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores as shown to the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Rounds won by noughts.
    pub nought_points: u32,
    /// Rounds won by crosses.
    pub cross_points: u32,
}

impl std::fmt::Display for ScoreSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Noughts: {}  Crosses: {}",
            self.nought_points, self.cross_points
        )
    }
}
