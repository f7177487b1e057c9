//! Win condition checking
//!
//! Five or more contiguous stones of one color along any of the four line
//! directions wins. Checks are centered on the stone just placed and only
//! look 4 cells either way, so their cost does not depend on board size.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Stones needed in a row to win
pub const WIN_LENGTH: usize = 5;

/// Cells examined on each side of the placed stone
const REACH: i32 = WIN_LENGTH as i32 - 1;

/// Walk from `pos` along `(dr, dc)` collecting contiguous `color` stones.
fn run_from(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> Vec<Pos> {
    let mut run = Vec::with_capacity(REACH as usize);
    for i in 1..=REACH {
        let (r, c) = pos.offset(dr, dc, i);
        if board.cell(r, c) != Some(color) {
            break;
        }
        run.push(Pos::new(r as u8, c as u8));
    }
    run
}

/// True if the stone at `pos` completes five-in-a-row for `color`.
///
/// Meant to be called on the stone just placed.
#[inline]
pub fn check_win(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let mut count = 1;
        for sign in [1, -1] {
            for i in 1..=REACH {
                let (r, c) = pos.offset(dr * sign, dc * sign, i);
                if board.cell(r, c) != Some(color) {
                    break;
                }
                count += 1;
            }
        }
        count >= WIN_LENGTH
    })
}

/// The five cells of the winning line through `pos`, if any.
///
/// Cells are ordered from the negative end of the run; when the run is
/// longer than five only the first five are reported.
pub fn find_winning_line(board: &Board, pos: Pos, color: Stone) -> Option<[Pos; WIN_LENGTH]> {
    for &(dr, dc) in &DIRECTIONS {
        let mut line = run_from(board, pos, -dr, -dc, color);
        line.reverse();
        line.push(pos);
        line.extend(run_from(board, pos, dr, dc, color));

        if line.len() >= WIN_LENGTH {
            return Some([line[0], line[1], line[2], line[3], line[4]]);
        }
    }
    None
}

/// Scan the whole board for a completed five.
///
/// Returns the first winner found in row-major order together with its line.
pub fn check_winner(board: &Board) -> Option<(Stone, [Pos; WIN_LENGTH])> {
    let n = board.size();
    for r in 0..n {
        for c in 0..n {
            let pos = Pos::new(r, c);
            let color = board.get(pos);
            if !color.is_color() {
                continue;
            }
            if let Some(line) = find_winning_line(board, pos, color) {
                return Some((color, line));
            }
        }
    }
    None
}
