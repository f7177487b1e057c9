//! Gomoku CPU opponent
//!
//! A freestyle Gomoku engine for a single machine player:
//! - Square board, 15x15 by default
//! - Five or more in a row wins, in any of the four line directions
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped trial moves
//! - [`rules`]: Win detection
//! - [`eval`]: Line and position scoring
//! - [`search`]: Candidate moves, threat scanning and alpha-beta minimax
//! - [`engine`]: CPU player integrating all components by difficulty
//! - [`game`]: Turn-taking session with a background CPU
//!
//! # Quick Start
//!
//! ```
//! use gomoku_cpu::{AIEngine, Board, EngineConfig, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new(EngineConfig::hard().with_depth(2).with_seed(1));
//!
//! board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! // CPU responds as White
//! if let Some(pos) = engine.get_move(&mut board, Stone::White) {
//!     board.place_stone(pos, Stone::White).unwrap();
//!     println!("CPU plays at {}", pos);
//! }
//! assert_eq!(board.stone_count(), 2);
//! ```
//!
//! # Move Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Easy: extend or block an open three; Hard: minimax search
//! 4. Random cell near the center

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use engine::{AIEngine, Difficulty, EngineConfig, EngineError, MoveResult, SearchType};
pub use game::{GameError, GameMode, GameOutcome, GameState};
