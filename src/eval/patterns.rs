//! Pattern scores for Gomoku evaluation
//!
//! A line through a stone is classified by how many same-color stones run
//! contiguously through it and how many of the run's two ends are open.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win. Also the search's forced-win sentinel.
    pub const FIVE: i32 = 10_000;
    /// Four with at least one open end
    pub const FOUR: i32 = 1_000;
    /// Open three: _OOO_ (the threshold for a "threat" move)
    pub const OPEN_THREE: i32 = 100;
    /// Three with one open end
    pub const CLOSED_THREE: i32 = 50;
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 10;
    /// Two with one open end
    pub const CLOSED_TWO: i32 = 5;
    /// Anything else, including a dead four
    pub const SINGLE: i32 = 1;
}

/// Map a contiguous run length and its open-end count to a score.
///
/// `open_ends` is at most 2. A four with no open end is worth no more than
/// a lone stone since it can never complete.
#[inline]
pub fn line_score(count: u32, open_ends: u32) -> i32 {
    match (count, open_ends) {
        (5.., _) => PatternScore::FIVE,
        (4, 1..) => PatternScore::FOUR,
        (3, 2..) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::CLOSED_THREE,
        (2, 2..) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::CLOSED_TWO,
        _ => PatternScore::SINGLE,
    }
}
