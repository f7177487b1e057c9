//! Game rules for Gomoku
//!
//! Freestyle rules: five or more in a row wins, no captures, no forbidden
//! moves, and a full board with no five is a draw.

pub mod win;

pub use win::{check_win, check_winner, find_winning_line, WIN_LENGTH};
