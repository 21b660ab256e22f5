//! The 3x3 grid.

use crate::error::{GameError, GameErrorKind};
use crate::rules;
use crate::types::{Cell, GameStatus, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Noughts and crosses board.
///
/// Cells are stored row-major (0-8). A cell is written at most once per
/// round; the only way to clear it again is [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Gets the cell at `index`, or `None` past the edge of the board.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Checks if the cell at `index` exists and is unclaimed.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Number of claimed cells.
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of cells claimed by `side`.
    pub fn count_for(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Claimed(side))
            .count()
    }

    /// Checks if every cell is claimed.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Indices of unclaimed cells.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&index| self.is_empty(index)).collect()
    }

    /// Claims the cell at `index` for `side`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index` is not 0-8, `AlreadyClaimed` if the cell
    /// already holds a mark. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn claim(&mut self, index: usize, side: Side) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| GameError::new(GameErrorKind::OutOfRange { index }))?;

        if !cell.is_empty() {
            return Err(GameError::new(GameErrorKind::AlreadyClaimed { index }));
        }

        *cell = Cell::Claimed(side);
        debug!(index, ?side, "Cell claimed");
        Ok(())
    }

    /// Evaluates the board after a move at `last_played`.
    ///
    /// Only the lines through `last_played` are checked. A completed line
    /// wins even when the move also fills the board.
    #[instrument(skip(self))]
    pub fn evaluate(&self, last_played: usize) -> GameStatus {
        if let Some(side) = rules::winner_through(self, last_played) {
            GameStatus::won_by(side)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }
}

impl std::fmt::Display for Board {
    /// Empty cells show their 1-based number so they can be typed as input.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Claimed(side) => write!(f, "{}", side.symbol())?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
