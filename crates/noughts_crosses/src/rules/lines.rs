//! Line membership: which rows, columns and diagonals pass through a cell.

use crate::board::CELL_COUNT;
use tracing::instrument;

/// Three cell indices forming a row, column or diagonal.
pub type Line = [usize; 3];

/// Kind of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum LineKind {
    /// Horizontal.
    Row,
    /// Vertical.
    Column,
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

const ROWS: [Line; 3] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];
const COLUMNS: [Line; 3] = [[0, 3, 6], [1, 4, 7], [2, 5, 8]];
const MAIN_DIAGONAL: Line = [0, 4, 8];
const ANTI_DIAGONAL: Line = [2, 4, 6];

/// Every winning line on the board.
pub const ALL_LINES: [Line; 8] = [
    ROWS[0],
    ROWS[1],
    ROWS[2],
    COLUMNS[0],
    COLUMNS[1],
    COLUMNS[2],
    MAIN_DIAGONAL,
    ANTI_DIAGONAL,
];

fn row(index: usize) -> Option<Line> {
    Some(ROWS[index / 3])
}

fn column(index: usize) -> Option<Line> {
    Some(COLUMNS[index % 3])
}

fn main_diagonal(index: usize) -> Option<Line> {
    (index % 4 == 0).then_some(MAIN_DIAGONAL)
}

fn anti_diagonal(index: usize) -> Option<Line> {
    matches!(index, 2 | 4 | 6).then_some(ANTI_DIAGONAL)
}

/// Membership predicates, one per line kind. Each yields the line of that
/// kind through the index, if there is one.
const MEMBERSHIP: [(LineKind, fn(usize) -> Option<Line>); 4] = [
    (LineKind::Row, row),
    (LineKind::Column, column),
    (LineKind::MainDiagonal, main_diagonal),
    (LineKind::AntiDiagonal, anti_diagonal),
];

/// Returns the lines passing through `index`.
///
/// Yields two lines for edge cells, three for corners and four for the
/// centre. An out-of-range index yields nothing.
#[instrument]
pub fn lines_through(index: usize) -> impl Iterator<Item = (LineKind, Line)> {
    MEMBERSHIP
        .into_iter()
        .filter(move |_| index < CELL_COUNT)
        .filter_map(move |(kind, line_for)| line_for(index).map(|line| (kind, line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(index: usize) -> Vec<LineKind> {
        lines_through(index).map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_centre_touches_four_lines() {
        assert_eq!(
            kinds(4),
            vec![
                LineKind::Row,
                LineKind::Column,
                LineKind::MainDiagonal,
                LineKind::AntiDiagonal
            ]
        );
    }

    #[test]
    fn test_corners_touch_one_diagonal() {
        assert_eq!(kinds(0), vec![LineKind::Row, LineKind::Column, LineKind::MainDiagonal]);
        assert_eq!(kinds(8), vec![LineKind::Row, LineKind::Column, LineKind::MainDiagonal]);
        assert_eq!(kinds(2), vec![LineKind::Row, LineKind::Column, LineKind::AntiDiagonal]);
        assert_eq!(kinds(6), vec![LineKind::Row, LineKind::Column, LineKind::AntiDiagonal]);
    }

    #[test]
    fn test_edges_touch_no_diagonal() {
        for index in [1, 3, 5, 7] {
            assert_eq!(kinds(index), vec![LineKind::Row, LineKind::Column]);
        }
    }

    #[test]
    fn test_every_line_contains_its_index() {
        for index in 0..CELL_COUNT {
            for (_, line) in lines_through(index) {
                assert!(line.contains(&index), "line {line:?} misses {index}");
            }
        }
    }

    #[test]
    fn test_out_of_range_has_no_lines() {
        assert_eq!(lines_through(9).count(), 0);
    }

    #[test]
    fn test_membership_covers_all_lines() {
        let mut seen: Vec<Line> = (0..CELL_COUNT)
            .flat_map(|index| lines_through(index).map(|(_, line)| line))
            .collect();
        seen.sort();
        seen.dedup();
        let mut all = ALL_LINES.to_vec();
        all.sort();
        assert_eq!(seen, all);
    }
}
