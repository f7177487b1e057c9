//! Immediate threat scanning
//!
//! One-move lookahead over every empty cell: place a trial stone, look at
//! what it made, take it back. Used by the engine to settle forced wins and
//! blocks before any heuristic or search runs.

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate_position, PatternScore};
use crate::rules::check_win;

/// Minimum position score for a move to count as building a three
pub const THREE_THRESHOLD: i32 = PatternScore::OPEN_THREE;

/// A candidate found by [`find_three_in_a_row`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatMove {
    pub pos: Pos,
    /// `evaluate_position` of the trial stone
    pub score: i32,
}

/// First empty cell, in row-major order, where `color` completes five.
///
/// The board is left exactly as it was found.
pub fn find_winning_move(board: &mut Board, color: Stone) -> Option<Pos> {
    let candidates: Vec<Pos> = board.empty_cells().collect();
    for pos in candidates {
        let Ok(trial) = board.place_scoped(pos, color) else {
            continue;
        };
        if check_win(&trial, pos, color) {
            return Some(pos);
        }
    }
    None
}

/// Best empty cell for `color` to build at least an open three.
///
/// Each empty cell is scored with a trial stone of `color`; cells scoring
/// at or above [`THREE_THRESHOLD`] qualify and the highest score wins, the
/// first one in row-major order on ties. The board is left unchanged.
pub fn find_three_in_a_row(board: &mut Board, color: Stone) -> Option<ThreatMove> {
    let candidates: Vec<Pos> = board.empty_cells().collect();
    let mut best: Option<ThreatMove> = None;

    for pos in candidates {
        let score = {
            let Ok(trial) = board.place_scoped(pos, color) else {
                continue;
            };
            evaluate_position(&trial, pos, color)
        };

        if score < THREE_THRESHOLD {
            continue;
        }
        if best.map_or(true, |b| score > b.score) {
            best = Some(ThreatMove { pos, score });
        }
    }

    best
}
