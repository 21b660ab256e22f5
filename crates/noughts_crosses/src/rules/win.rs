//! Win detection.

use super::lines::{ALL_LINES, Line, lines_through};
use crate::{Board, Cell, Side};
use tracing::instrument;

/// Returns the side holding all three cells of `line`, if any.
pub fn line_winner(board: &Board, line: Line) -> Option<Side> {
    let [a, b, c] = line.map(|index| board.get(index));
    match (a, b, c) {
        (Some(Cell::Claimed(side)), Some(second), Some(third))
            if second == Cell::Claimed(side) && third == Cell::Claimed(side) =>
        {
            Some(side)
        }
        _ => None,
    }
}

/// Checks only the lines through `index`.
///
/// A line can only have just become complete if the last move is on it.
#[instrument(skip(board))]
pub fn winner_through(board: &Board, index: usize) -> Option<Side> {
    lines_through(index).find_map(|(_, line)| line_winner(board, line))
}

/// Scans every line on the board.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Side> {
    ALL_LINES.into_iter().find_map(|line| line_winner(board, line))
}
