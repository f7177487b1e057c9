//! Heuristic evaluation function for Gomoku board positions
//!
//! Every stone is scored by the best shape it forms along each of the four
//! line directions. The board score for a color is the sum over its own
//! stones minus the same sum over the opponent's.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::patterns::line_score;

/// Steps walked on each side of the seed stone
const MAX_STEPS: i32 = 4;

/// Score the line through `pos` along `(dr, dc)` for `color`.
///
/// The seed cell counts as one stone whatever it holds. From it, walk up to
/// 4 steps each way; a side contributes an open end only if the walk stops
/// on an empty in-bounds cell. A side that runs all 4 steps or hits the edge
/// or an opponent stone is closed.
pub fn evaluate_line(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let mut count = 1;
    let mut open_ends = 0;

    for sign in [1, -1] {
        for i in 1..=MAX_STEPS {
            let (r, c) = pos.offset(dr * sign, dc * sign, i);
            match board.cell(r, c) {
                Some(s) if s == color => count += 1,
                Some(Stone::Empty) => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    line_score(count, open_ends)
}

/// Sum of [`evaluate_line`] over the four directions.
#[inline]
pub fn evaluate_position(board: &Board, pos: Pos, color: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| evaluate_line(board, pos, dr, dc, color))
        .sum()
}

/// Differential board score from `color`'s point of view.
///
/// Positive values favour `color`. Swapping the color negates the score.
#[must_use]
pub fn evaluate_board_for_color(board: &Board, color: Stone) -> i32 {
    let side_total = |side: Stone| -> i32 {
        let Some(stones) = board.stones(side) else {
            return 0;
        };
        stones
            .iter_ones()
            .map(|pos| evaluate_position(board, pos, side))
            .sum()
    };

    side_total(color) - side_total(color.opponent())
}
