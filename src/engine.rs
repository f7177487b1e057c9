//! CPU opponent integrating the threat scanner and the minimax search
//!
//! Every move goes through the same cascade, cheapest first:
//!
//! 1. **Immediate win**: play a cell that completes five
//! 2. **Block**: occupy a cell where the opponent would complete five
//! 3. Tier-specific move:
//!    - Easy: **extend** our best open three, else **block** the opponent's
//!      best open three
//!    - Hard: **minimax** at the configured depth
//! 4. **Random fallback**: a random empty cell near the center, or anywhere
//!    if the center area is full
//!
//! Forced results are settled before any heuristic or search runs, so a
//! one-move win or block is never missed and never costs a search.
//!
//! # Example
//!
//! ```
//! use gomoku_cpu::{AIEngine, Board, EngineConfig, Pos, SearchType, Stone};
//!
//! let mut engine = AIEngine::new(EngineConfig::hard().with_seed(7));
//! let mut board = Board::new();
//! for i in 0..4 {
//!     board.place_stone(Pos::new(7, 3 + i), Stone::Black).unwrap();
//! }
//!
//! let result = engine.get_move_with_stats(&mut board, Stone::Black);
//! assert_eq!(result.search_type, SearchType::ImmediateWin);
//! assert_eq!(result.best_move, Some(Pos::new(7, 2)));
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::board::{Board, Pos, Stone};
use crate::search::{find_three_in_a_row, find_winning_move, Searcher, WIN_SCORE};

/// Search depth used by the hard tier
pub const HARD_DEPTH: u8 = 3;
/// Depth recorded for the easy tier; easy never searches
pub const EASY_DEPTH: u8 = 1;
/// Half-width of the square around the center used by the random fallback
pub const FALLBACK_RADIUS: u8 = 4;

/// Engine configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown difficulty {0:?} (expected \"easy\" or \"hard\")")]
    UnknownDifficulty(String),
}

/// Playing strength tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Tactical scan only: wins, blocks, and threes
    #[default]
    Easy,
    /// Wins and blocks, then minimax
    Hard,
}

impl Difficulty {
    pub fn default_depth(self) -> u8 {
        match self {
            Difficulty::Easy => EASY_DEPTH,
            Difficulty::Hard => HARD_DEPTH,
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        })
    }
}

/// Engine settings.
///
/// `seed` makes the random fallback reproducible; without it the engine
/// draws its seed from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Minimax depth (hard tier only)
    pub depth: u8,
    pub fallback_radius: u8,
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            depth: difficulty.default_depth(),
            fallback_radius: FALLBACK_RADIUS,
            seed: None,
        }
    }

    pub fn easy() -> Self {
        Self::for_difficulty(Difficulty::Easy)
    }

    pub fn hard() -> Self {
        Self::for_difficulty(Difficulty::Hard)
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_fallback_radius(mut self, radius: u8) -> Self {
        self.fallback_radius = radius;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::easy()
    }
}

/// Which step of the cascade produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes five for the engine
    ImmediateWin,
    /// Occupies a cell where the opponent would complete five
    Block,
    /// Builds our best open three (easy tier)
    ExtendThree,
    /// Takes the opponent's best open-three cell (easy tier)
    BlockThree,
    /// Chosen by minimax (hard tier)
    Minimax,
    /// Random cell near the center
    RandomFallback,
    /// Nothing to play: the board is full
    NoMove,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen move, `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Score behind the decision (meaning depends on `search_type`)
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Minimax nodes visited (0 when no search ran)
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }

    #[inline]
    fn no_move(start: Instant) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }
}

/// CPU opponent.
///
/// The board passed to [`AIEngine::get_move`] is borrowed mutably for trial
/// placements and always handed back unchanged.
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
    rng: ChaCha8Rng,
}

impl AIEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            searcher: Searcher::new(),
            rng,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(EngineConfig::for_difficulty(difficulty))
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Change the minimax depth used by the hard tier.
    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    /// Best move for `color`, or `None` if the board is full.
    #[must_use]
    pub fn get_move(&mut self, board: &mut Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Run the full decision cascade and report how the move was found.
    pub fn get_move_with_stats(&mut self, board: &mut Board, color: Stone) -> MoveResult {
        let start = Instant::now();

        if !color.is_color() {
            warn!("asked to move for an empty stone color");
            return MoveResult::no_move(start);
        }
        if board.is_full() {
            debug!("board is full, no move for {:?}", color);
            return MoveResult::no_move(start);
        }

        let opponent = color.opponent();

        if let Some(pos) = find_winning_move(board, color) {
            debug!("{:?} wins at {}", color, pos);
            return MoveResult::found(pos, WIN_SCORE, SearchType::ImmediateWin, start);
        }

        if let Some(pos) = find_winning_move(board, opponent) {
            debug!("{:?} blocks {:?} five at {}", color, opponent, pos);
            return MoveResult::found(pos, -WIN_SCORE, SearchType::Block, start);
        }

        match self.config.difficulty {
            Difficulty::Easy => {
                if let Some(threat) = find_three_in_a_row(board, color) {
                    debug!("{:?} builds a three at {} ({})", color, threat.pos, threat.score);
                    return MoveResult::found(
                        threat.pos,
                        threat.score,
                        SearchType::ExtendThree,
                        start,
                    );
                }
                if let Some(threat) = find_three_in_a_row(board, opponent) {
                    debug!("{:?} blocks a three at {} ({})", color, threat.pos, threat.score);
                    return MoveResult::found(
                        threat.pos,
                        -threat.score,
                        SearchType::BlockThree,
                        start,
                    );
                }
            }
            Difficulty::Hard => {
                let result = self.searcher.search(board, color, self.config.depth);
                let nodes = self.searcher.nodes();
                if let Some(pos) = result.best_move {
                    debug!(
                        "{:?} minimax move {} score {} ({} nodes)",
                        color, pos, result.score, nodes
                    );
                    return MoveResult {
                        best_move: Some(pos),
                        score: result.score,
                        search_type: SearchType::Minimax,
                        time_ms: start.elapsed().as_millis() as u64,
                        nodes,
                    };
                }
                debug!("minimax found no move at depth {}", self.config.depth);
            }
        }

        match self.center_random_move(board) {
            Some(pos) => {
                debug!("{:?} plays random fallback {}", color, pos);
                MoveResult::found(pos, 0, SearchType::RandomFallback, start)
            }
            None => MoveResult::no_move(start),
        }
    }

    /// Uniformly random empty cell within `fallback_radius` of the center,
    /// widening to the whole board when that square is full.
    pub fn center_random_move(&mut self, board: &Board) -> Option<Pos> {
        let center = board.center();
        let radius = self.config.fallback_radius;
        let near = |p: &Pos| p.row.abs_diff(center.row) <= radius && p.col.abs_diff(center.col) <= radius;

        let mut moves: Vec<Pos> = board.empty_cells().filter(near).collect();
        if moves.is_empty() {
            moves = board.empty_cells().collect();
        }
        moves.choose(&mut self.rng).copied()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::get_valid_moves;

    fn place(board: &mut Board, stones: &[(u8, u8)], color: Stone) {
        for &(r, c) in stones {
            board.place_stone(Pos::new(r, c), color).unwrap();
        }
    }

    fn seeded(config: EngineConfig) -> AIEngine {
        AIEngine::new(config.with_seed(42))
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "medium".parse::<Difficulty>(),
            Err(EngineError::UnknownDifficulty("medium".to_string()))
        );
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_config_defaults() {
        let easy = EngineConfig::default();
        assert_eq!(easy.difficulty, Difficulty::Easy);
        assert_eq!(easy.depth, EASY_DEPTH);
        assert_eq!(easy.fallback_radius, FALLBACK_RADIUS);
        assert_eq!(easy.seed, None);

        let hard = EngineConfig::hard().with_depth(2).with_seed(9);
        assert_eq!(hard.depth, 2);
        assert_eq!(hard.seed, Some(9));
    }

    #[test]
    fn test_set_depth() {
        let mut engine = AIEngine::with_difficulty(Difficulty::Hard);
        assert_eq!(engine.config().depth, HARD_DEPTH);
        engine.set_depth(2);
        assert_eq!(engine.config().depth, 2);
        assert_eq!(engine.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_empty_board_plays_center_on_hard() {
        let mut board = Board::new();
        let mut engine = seeded(EngineConfig::hard());
        let result = engine.get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        assert_eq!(result.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_immediate_win_on_both_tiers() {
        for config in [EngineConfig::easy(), EngineConfig::hard()] {
            let mut board = Board::new();
            place(&mut board, &[(9, 0), (9, 1), (9, 2), (9, 3)], Stone::Black);
            place(&mut board, &[(3, 3), (3, 4), (3, 5), (3, 6)], Stone::White);

            let result = seeded(config).get_move_with_stats(&mut board, Stone::Black);
            assert_eq!(result.best_move, Some(Pos::new(9, 4)));
            assert_eq!(result.search_type, SearchType::ImmediateWin);
            assert_eq!(result.score, WIN_SCORE);
        }
    }

    #[test]
    fn test_blocks_opponent_five() {
        for config in [EngineConfig::easy(), EngineConfig::hard()] {
            let mut board = Board::new();
            place(&mut board, &[(9, 0), (9, 1), (9, 2), (9, 3)], Stone::White);
            place(&mut board, &[(10, 5)], Stone::Black);

            let result = seeded(config).get_move_with_stats(&mut board, Stone::Black);
            assert_eq!(result.best_move, Some(Pos::new(9, 4)));
            assert_eq!(result.search_type, SearchType::Block);
        }
    }

    #[test]
    fn test_easy_extends_three() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7), (7, 8)], Stone::Black);
        place(&mut board, &[(8, 8)], Stone::White);

        let result = seeded(EngineConfig::easy()).get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.search_type, SearchType::ExtendThree);
        assert_eq!(result.best_move, Some(Pos::new(7, 6)));
    }

    #[test]
    fn test_easy_blocks_three() {
        let mut board = Board::new();
        place(&mut board, &[(5, 5), (5, 6)], Stone::White);
        place(&mut board, &[(10, 10)], Stone::Black);

        let result = seeded(EngineConfig::easy()).get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.search_type, SearchType::BlockThree);
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
    }

    #[test]
    fn test_easy_random_fallback_near_center() {
        let mut board = Board::new();
        place(&mut board, &[(0, 0)], Stone::White);

        let result = seeded(EngineConfig::easy()).get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.search_type, SearchType::RandomFallback);
        let pos = result.best_move.unwrap();
        assert!(pos.row.abs_diff(7) <= 4 && pos.col.abs_diff(7) <= 4);
        assert!(board.is_empty(pos));
    }

    #[test]
    fn test_random_fallback_is_reproducible_with_seed() {
        let board = Board::new();
        let a = seeded(EngineConfig::easy()).center_random_move(&board);
        let b = seeded(EngineConfig::easy()).center_random_move(&board);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_fallback_widens_when_center_full() {
        let mut board = Board::with_size(7).unwrap();
        // Fill the 3x3 around the center without making a line of five
        let mut color = Stone::Black;
        for r in 2..=4u8 {
            for c in 2..=4u8 {
                board.place_stone(Pos::new(r, c), color).unwrap();
                color = color.opponent();
            }
        }
        let mut engine = seeded(EngineConfig::easy().with_fallback_radius(1));
        let pos = engine.center_random_move(&board).unwrap();
        assert!(board.is_empty(pos));
        assert!(pos.row.abs_diff(3) > 1 || pos.col.abs_diff(3) > 1);
    }

    #[test]
    fn test_hard_zero_depth_falls_back_to_random() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7)], Stone::White);

        let mut engine = seeded(EngineConfig::hard().with_depth(0));
        let result = engine.get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.search_type, SearchType::RandomFallback);
    }

    #[test]
    fn test_hard_move_is_candidate_and_board_unchanged() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7), (8, 9)], Stone::Black);
        place(&mut board, &[(7, 8), (9, 7)], Stone::White);
        let snapshot = board.clone();
        let candidates = get_valid_moves(&board);

        let result = seeded(EngineConfig::hard()).get_move_with_stats(&mut board, Stone::White);
        assert_eq!(result.search_type, SearchType::Minimax);
        assert!(candidates.contains(&result.best_move.unwrap()));
        assert!(result.nodes > 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut board = Board::with_size(5).unwrap();
        for r in 0..5u8 {
            for c in 0..5u8 {
                let color = if (r + c / 2) % 2 == 0 { Stone::Black } else { Stone::White };
                board.place_stone(Pos::new(r, c), color).unwrap();
            }
        }
        let result = seeded(EngineConfig::hard()).get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_empty_color_returns_none() {
        let mut board = Board::new();
        let mut engine = AIEngine::default();
        assert_eq!(engine.get_move(&mut board, Stone::Empty), None);
    }
}
