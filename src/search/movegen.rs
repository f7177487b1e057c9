//! Candidate move generation
//!
//! Only frontier cells are considered: empty cells in the 8-neighbourhood of
//! some stone. A stone placed away from every existing stone cannot create or
//! block any line that matters to the current shape.

use crate::board::{Board, Pos};

/// Empty cells adjacent to at least one stone, deduplicated.
///
/// Order is deterministic: stones are visited in row-major order and each
/// stone's neighbours row by row. An empty board yields only the center; a
/// full board yields nothing, which callers treat as a draw.
pub fn get_valid_moves(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let n = board.size();
    let mut moves = Vec::with_capacity(64);
    let mut seen = vec![false; n as usize * n as usize];

    for r in 0..n {
        for c in 0..n {
            let pos = Pos::new(r, c);
            if board.is_empty(pos) {
                continue;
            }

            for dr in -1..=1 {
                for dc in -1..=1 {
                    let (nr, nc) = pos.offset(dr, dc, 1);
                    if !board.in_bounds(nr, nc) {
                        continue;
                    }
                    let next = Pos::new(nr as u8, nc as u8);
                    let idx = next.to_index(n);
                    if seen[idx] || !board.is_empty(next) {
                        continue;
                    }
                    seen[idx] = true;
                    moves.push(next);
                }
            }
        }
    }

    moves
}
