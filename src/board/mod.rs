//! Board representation for Gomoku

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use thiserror::Error;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, PlacedStone};

/// Reference board size (15x15)
pub const DEFAULT_BOARD_SIZE: u8 = 15;
/// Smallest board on which five-in-a-row is possible
pub const MIN_BOARD_SIZE: u8 = 5;
/// Largest supported board
pub const MAX_BOARD_SIZE: u8 = 32;

/// Direction vectors for line scanning (4 directions, each scanned both ways)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal down
    (1, -1), // Diagonal up
];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// True for Black or White
    #[inline]
    pub fn is_color(self) -> bool {
        self != Stone::Empty
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board of the given size
    #[inline]
    pub fn to_index(self, size: u8) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: u8) -> Self {
        Self {
            row: (idx / size as usize) as u8,
            col: (idx % size as usize) as u8,
        }
    }

    /// Step `n` cells along `(dr, dc)`. The result may be off the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, n: i32) -> (i32, i32) {
        (i32::from(self.row) + dr * n, i32::from(self.col) + dc * n)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors raised by board mutations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: u8 },
    #[error("cell {0} is already occupied")]
    Occupied(Pos),
    #[error("cannot place an empty stone at {0}")]
    EmptyStone(Pos),
    #[error("unsupported board size {0} (expected {}..={})", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidSize(usize),
}
