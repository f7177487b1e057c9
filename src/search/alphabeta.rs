//! Depth-limited minimax with alpha-beta pruning
//!
//! The search plays trial stones directly on the caller's board through
//! [`Board::place_scoped`], so every exit path, including the forced-win
//! short-circuits, restores the board before returning.
//!
//! # Example
//!
//! ```
//! use gomoku_cpu::board::{Board, Pos, Stone};
//! use gomoku_cpu::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::White).unwrap();
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&mut board, Stone::Black, 2);
//! assert!(result.best_move.is_some());
//! assert_eq!(board.stone_count(), 1);
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate_board_for_color, PatternScore};
use crate::rules::check_win;

use super::movegen::get_valid_moves;

/// Score of a forced win for the searching side
pub const WIN_SCORE: i32 = PatternScore::FIVE;

/// Open bounds for the root window
const INF: i32 = i32::MAX;

/// Result of a minimax call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` at leaves and when no candidate exists
    pub best_move: Option<Pos>,
    /// Score from the AI color's point of view
    pub score: i32,
}

impl SearchResult {
    #[inline]
    fn leaf(score: i32) -> Self {
        Self { best_move: None, score }
    }
}

/// Minimax searcher. Keeps a node counter for diagnostics.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Nodes visited by the last [`Searcher::search`]
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies for the best move of `ai_color`.
    pub fn search(&mut self, board: &mut Board, ai_color: Stone, depth: u8) -> SearchResult {
        self.nodes = 0;
        let result = self.minimax(board, depth, true, ai_color, -INF, INF);
        log::trace!(
            "minimax depth {} for {:?}: {:?} score {} ({} nodes)",
            depth,
            ai_color,
            result.best_move,
            result.score,
            self.nodes
        );
        result
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Maximizing nodes play `ai_color`, minimizing nodes its opponent.
    /// Candidates come from [`get_valid_moves`] and are tried in that order;
    /// a new best needs a strictly better score, so the first of equal
    /// moves is kept.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        ai_color: Stone,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 {
            return SearchResult::leaf(evaluate_board_for_color(board, ai_color));
        }

        let moves = get_valid_moves(board);
        if moves.is_empty() {
            return SearchResult::leaf(0);
        }

        let (mover, win_score) = if maximizing {
            (ai_color, WIN_SCORE)
        } else {
            (ai_color.opponent(), -WIN_SCORE)
        };

        let mut best_move = None;
        let mut best_score = if maximizing { -INF } else { INF };

        for mv in moves {
            let score = {
                let Ok(mut trial) = board.place_scoped(mv, mover) else {
                    continue;
                };
                if check_win(&trial, mv, mover) {
                    return SearchResult {
                        best_move: Some(mv),
                        score: win_score,
                    };
                }
                self.minimax(&mut trial, depth - 1, !maximizing, ai_color, alpha, beta)
                    .score
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
        }
    }
}
