//! 3x3 grid geometry with (row, col) coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board side length
pub const BOARD_SIZE: u8 = 3;

/// Total number of cells
pub const CELL_COUNT: usize = 9;

/// A grid coordinate; as a move, the cell a mark is placed on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major cell index (0-8)
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Inverse of [`Move::index`]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self::new(
            (index / BOARD_SIZE as usize) as u8,
            (index % BOARD_SIZE as usize) as u8,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 8 winning lines as cell indices
pub const LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// All coordinates in row-major order
pub fn all_positions() -> impl Iterator<Item = Move> {
    (0..CELL_COUNT).map(Move::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_validity() {
        assert!(Move::new(0, 0).is_valid());
        assert!(Move::new(2, 2).is_valid());
        assert!(!Move::new(3, 0).is_valid());
        assert!(!Move::new(0, 3).is_valid());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, mv) in all_positions().enumerate() {
            assert_eq!(mv.index(), i);
        }
        assert_eq!(Move::from_index(5), Move::new(1, 2));
    }

    #[test]
    fn test_lines_cover_center_four_times() {
        let through_center = LINES.iter().filter(|line| line.contains(&4)).count();
        assert_eq!(through_center, 4);
    }
}
