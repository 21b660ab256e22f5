//! Named cells, for input parsing and labels.

use crate::board::Board;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A cell on the board by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Cell 0.
    TopLeft,
    /// Cell 1.
    TopCenter,
    /// Cell 2.
    TopRight,
    /// Cell 3.
    MiddleLeft,
    /// Cell 4.
    Center,
    /// Cell 5.
    MiddleRight,
    /// Cell 6.
    BottomLeft,
    /// Cell 7.
    BottomCenter,
    /// Cell 8.
    BottomRight,
}

impl Position {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Board index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Position for a board index, or `None` past the edge.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Parses what a player typed: the 1-based number shown on the board
    /// (`1`-`9`) or a label such as `center` or `top left`.
    #[instrument]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return number.checked_sub(1).and_then(Self::from_index);
        }

        let wanted = normalize(input);
        if wanted.is_empty() {
            return None;
        }
        Self::iter().find(|pos| normalize(pos.label()) == wanted)
    }

    /// Unclaimed positions on `board`.
    #[instrument(skip(board))]
    pub fn open_on(board: &Board) -> Vec<Position> {
        Self::iter()
            .filter(|pos| board.is_empty(pos.to_index()))
            .collect()
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .replace("centre", "center")
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_index_round_trip_bounds() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::from_index(8), Some(Position::BottomRight));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_numbers_are_one_based() {
        assert_eq!(Position::parse("1"), Some(Position::TopLeft));
        assert_eq!(Position::parse(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::parse("0"), None);
        assert_eq!(Position::parse("10"), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(Position::parse("center"), Some(Position::Center));
        assert_eq!(Position::parse("Centre"), Some(Position::Center));
        assert_eq!(Position::parse("top left"), Some(Position::TopLeft));
        assert_eq!(Position::parse("bottom-center"), Some(Position::BottomCenter));
        assert_eq!(Position::parse("middle"), None);
        assert_eq!(Position::parse(""), None);
    }

    #[test]
    fn test_open_on_filters_claimed() {
        let mut board = Board::new();
        board.claim(0, Side::Cross).expect("empty cell");
        board.claim(4, Side::Nought).expect("empty cell");
        let open = Position::open_on(&board);
        assert_eq!(open.len(), 7);
        assert!(!open.contains(&Position::TopLeft));
        assert!(!open.contains(&Position::Center));
        assert!(open.contains(&Position::BottomRight));
    }
}
