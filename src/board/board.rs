//! Board structure with placement history

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{BoardError, Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Game board. Dimension is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
    /// Placement order, most recent last. `remove_stone` may only pop the top.
    history: Vec<Pos>,
}

impl Board {
    /// Reference 15x15 board
    pub fn new() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }

    /// Board of an arbitrary supported size
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE as usize..=MAX_BOARD_SIZE as usize).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::empty(size as u8))
    }

    fn empty(size: u8) -> Self {
        let cells = size as usize * size as usize;
        Self {
            size,
            black: Bitboard::new(size),
            white: Bitboard::new(size),
            history: Vec::with_capacity(cells),
        }
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Center cell `(N/2, N/2)`
    #[inline]
    pub fn center(&self) -> Pos {
        Pos::new(self.size / 2, self.size / 2)
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        let n = i32::from(self.size);
        row >= 0 && row < n && col >= 0 && col < n
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates, `None` when off the board
    #[inline]
    pub fn cell(&self, row: i32, col: i32) -> Option<Stone> {
        if self.in_bounds(row, col) {
            Some(self.get(Pos::new(row as u8, col as u8)))
        } else {
            None
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone. Fails without mutating on an occupied or off-board cell.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        if !self.in_bounds(i32::from(pos.row), i32::from(pos.col)) {
            return Err(BoardError::OutOfBounds {
                row: i32::from(pos.row),
                col: i32::from(pos.col),
                size: self.size,
            });
        }
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied(pos));
        }
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => return Err(BoardError::EmptyStone(pos)),
        }
        self.history.push(pos);
        Ok(())
    }

    /// Retract the most recently placed stone.
    ///
    /// # Panics
    ///
    /// If `pos` is not the last placed stone. That means a trial placement
    /// was not paired with its undo, and the board can no longer be trusted.
    pub fn remove_stone(&mut self, pos: Pos) {
        let last = self.history.pop();
        assert_eq!(
            last,
            Some(pos),
            "inconsistent board state: removing {pos} but last placed stone is {last:?}"
        );
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Place a stone that is removed again when the returned guard drops.
    ///
    /// The guard derefs to the board, so nested trials stack naturally and
    /// every early return unwinds them in order.
    pub fn place_scoped(&mut self, pos: Pos, stone: Stone) -> Result<PlacedStone<'_>, BoardError> {
        self.place_stone(pos, stone)?;
        Ok(PlacedStone { board: self, pos })
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size as usize * self.size as usize
    }

    /// Most recently placed stone
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Placement order, oldest first
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |r| (0..n).map(move |c| Pos::new(r, c)))
            .filter(move |&p| self.is_empty(p))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, "{c:2}")?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{r:2} ")?;
            for c in 0..self.size {
                let ch = match self.get(Pos::new(r, c)) {
                    Stone::Black => " X",
                    Stone::White => " O",
                    Stone::Empty => " .",
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A stone placed by [`Board::place_scoped`], removed on drop.
#[must_use = "the stone is removed as soon as the guard is dropped"]
pub struct PlacedStone<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl PlacedStone<'_> {
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for PlacedStone<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedStone<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedStone<'_> {
    fn drop(&mut self) {
        self.board.remove_stone(self.pos);
    }
}
