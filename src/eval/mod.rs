//! Evaluation module for Gomoku positions
//!
//! Line-based scoring of single stones and whole boards. Everything here
//! is pure: no mutation, no randomness.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_board_for_color, evaluate_line, evaluate_position};
pub use patterns::{line_score, PatternScore};
