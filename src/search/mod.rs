//! Search module for the Gomoku CPU
//!
//! Contains:
//! - Frontier move generation
//! - One-move threat scanning (wins, blocks, threes)
//! - Minimax with alpha-beta pruning

pub mod alphabeta;
pub mod movegen;
pub mod threat;

pub use alphabeta::{SearchResult, Searcher, WIN_SCORE};
pub use movegen::get_valid_moves;
pub use threat::{find_three_in_a_row, find_winning_move, ThreatMove, THREE_THRESHOLD};
