//! Game session management
//!
//! Tracks turns, history and the result of a game, and runs the CPU on a
//! background thread so a front end can keep polling while it thinks.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::board::{Board, BoardError, Pos, Stone};
use crate::engine::{AIEngine, EngineConfig, MoveResult};
use crate::rules::{check_winner, find_winning_line, WIN_LENGTH};

/// Default thinking time per move for a human player
pub const DEFAULT_TURN_LIMIT: Duration = Duration::from_secs(30);

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Human against the CPU
    VsCpu {
        human_color: Stone,
        config: EngineConfig,
    },
    /// Two humans sharing the board
    HotSeat,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::VsCpu {
            human_color: Stone::Black,
            config: EngineConfig::default(),
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win {
        winner: Stone,
        line: [Pos; WIN_LENGTH],
    },
    /// Board filled with no five
    Draw,
    /// The losing side gave up
    Resign { winner: Stone },
}

/// Rejected session actions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("game is over")]
    GameOver,
    #[error("CPU is thinking")]
    AiThinking,
    #[error("not your turn")]
    NotYourTurn,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// CPU computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub outcome: Option<GameOutcome>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    /// Time allowed per move, `None` for unlimited
    pub turn_limit: Option<Duration>,
    turn_started: Instant,
    rng: ChaCha8Rng,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self::with_board(Board::new(), mode)
    }

    /// Session on a custom (usually smaller) empty board
    pub fn with_board(board: Board, mode: GameMode) -> Self {
        let seed = match mode {
            GameMode::VsCpu { config, .. } => config.seed,
            GameMode::HotSeat => None,
        };
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            board,
            mode,
            current_turn: Stone::Black,
            outcome: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            turn_limit: Some(DEFAULT_TURN_LIMIT),
            turn_started: Instant::now(),
            rng,
        }
    }

    /// Set the per-move time limit; `None` or a zero duration means unlimited.
    #[must_use]
    pub fn with_turn_limit(mut self, limit: Option<Duration>) -> Self {
        self.turn_limit = limit.filter(|d| !d.is_zero());
        self
    }

    /// Clear the board and start over with the same mode and size.
    pub fn reset(&mut self) {
        let size = self.board.size();
        // Size came from a valid board, so rebuilding cannot fail
        if let Ok(board) = Board::with_size(size as usize) {
            self.board = board;
        }
        self.current_turn = Stone::Black;
        self.outcome = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.turn_started = Instant::now();
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::VsCpu { human_color, .. } => self.current_turn == human_color,
            GameMode::HotSeat => true,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Play a human move for the side to move.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(GameError::AiThinking);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotYourTurn);
        }

        self.execute_move(pos)?;
        Ok(())
    }

    /// Place a stone for `current_turn`, then settle win, draw, or pass the turn.
    fn execute_move(&mut self, pos: Pos) -> Result<(), BoardError> {
        let color = self.current_turn;
        self.board.place_stone(pos, color)?;

        self.move_history.push((pos, color));
        self.last_move = Some(pos);

        if let Some(line) = find_winning_line(&self.board, pos, color) {
            info!("{:?} wins with {} .. {}", color, line[0], line[WIN_LENGTH - 1]);
            self.outcome = Some(GameOutcome::Win { winner: color, line });
            return Ok(());
        }

        if self.board.is_full() {
            info!("board full after {} moves, draw", self.move_history.len());
            self.outcome = Some(GameOutcome::Draw);
            return Ok(());
        }

        self.current_turn = color.opponent();
        self.turn_started = Instant::now();
        Ok(())
    }

    /// Hand a snapshot of the board to a worker thread running the engine.
    ///
    /// Does nothing unless it is the CPU's turn in a live game.
    pub fn start_ai_thinking(&mut self) {
        let GameMode::VsCpu { mut config, .. } = self.mode else {
            return;
        };
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_over() {
            return;
        }

        // Vary a fixed seed per move so seeded games stay reproducible
        if let Some(seed) = config.seed {
            config.seed = Some(seed.wrapping_add(self.move_history.len() as u64));
        }

        let mut board = self.board.clone();
        let color = self.current_turn;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::new(config);
            let result = engine.get_move_with_stats(&mut board, color);
            // Receiver is gone if the session timed out or reset
            let _ = tx.send(result);
        });

        debug!("CPU started thinking for {:?}", color);
        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the CPU move if it is ready. Never blocks.
    pub fn poll_ai(&mut self) -> Option<Pos> {
        let AiState::Thinking { receiver, .. } = &self.ai_state else {
            return None;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.ai_state = AiState::Idle;
                self.apply_ai_result(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("CPU worker exited without a move");
                self.ai_state = AiState::Idle;
                self.play_random_move()
            }
        }
    }

    /// Block up to `timeout` for the CPU move.
    ///
    /// A result arriving after the deadline is discarded and a random empty
    /// cell is played instead.
    pub fn wait_ai(&mut self, timeout: Duration) -> Option<Pos> {
        let AiState::Thinking { receiver, .. } = &self.ai_state else {
            return None;
        };

        let received = receiver.recv_timeout(timeout);
        self.ai_state = AiState::Idle;

        match received {
            Ok(result) => self.apply_ai_result(result),
            Err(RecvTimeoutError::Timeout) => {
                warn!("CPU did not answer within {:?}, playing a random move", timeout);
                self.play_random_move()
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("CPU worker exited without a move");
                self.play_random_move()
            }
        }
    }

    /// How long the CPU has been thinking, if it is
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    fn apply_ai_result(&mut self, result: MoveResult) -> Option<Pos> {
        self.last_ai_result = Some(result);
        if self.is_over() {
            return None;
        }

        match result.best_move {
            Some(pos) => match self.execute_move(pos) {
                Ok(()) => Some(pos),
                Err(e) => {
                    warn!("CPU move {} rejected: {}", pos, e);
                    self.play_random_move()
                }
            },
            None => self.play_random_move(),
        }
    }

    /// Play a uniformly random empty cell for the side to move.
    fn play_random_move(&mut self) -> Option<Pos> {
        if self.is_over() {
            return None;
        }
        let cells: Vec<Pos> = self.board.empty_cells().collect();
        let pos = *cells.choose(&mut self.rng)?;
        self.execute_move(pos).ok()?;
        Some(pos)
    }

    /// Scan the whole board for a five and end the game if one exists.
    pub fn claim_win(&mut self) -> Option<GameOutcome> {
        if let Some(outcome) = self.outcome {
            return Some(outcome);
        }
        let (winner, line) = check_winner(&self.board)?;
        let outcome = GameOutcome::Win { winner, line };
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Time left for the side to move, `None` when unlimited or finished
    pub fn turn_time_left(&self) -> Option<Duration> {
        if self.is_over() {
            return None;
        }
        let limit = self.turn_limit?;
        Some(limit.saturating_sub(self.turn_started.elapsed()))
    }

    pub fn is_turn_expired(&self) -> bool {
        self.turn_time_left() == Some(Duration::ZERO)
    }

    /// Handle a run-out clock: play a random empty cell for the side to move.
    ///
    /// Returns the cell played. Ignored while the CPU is thinking, since its
    /// own deadline is enforced by [`GameState::wait_ai`].
    pub fn expire_turn(&mut self) -> Option<Pos> {
        if self.is_over() || self.is_ai_thinking() {
            return None;
        }
        let pos = self.play_random_move()?;
        info!("{:?} ran out of time, random move {}", self.board.get(pos), pos);
        Some(pos)
    }

    /// Give up the game.
    ///
    /// Against the CPU the human resigns; in hot-seat play the side to move
    /// does. A pending CPU result is dropped.
    pub fn resign(&mut self) -> Result<GameOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let loser = match self.mode {
            GameMode::VsCpu { human_color, .. } => human_color,
            GameMode::HotSeat => self.current_turn,
        };
        self.ai_state = AiState::Idle;

        let outcome = GameOutcome::Resign {
            winner: loser.opponent(),
        };
        info!("{:?} resigns", loser);
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// Take back the last move; against the CPU, back to the human's last move.
    ///
    /// The board is rebuilt from the move history, so stones put on `board`
    /// directly are discarded.
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::VsCpu { human_color, .. } => {
                let Some(&(_, last_color)) = self.move_history.last() else {
                    return;
                };
                if last_color != human_color && self.move_history.len() >= 2 {
                    2
                } else {
                    1
                }
            }
            GameMode::HotSeat => 1,
        };

        let moves_to_keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<_> = self.move_history.drain(..moves_to_keep).collect();
        self.move_history.clear();

        // Size came from a valid board, so rebuilding cannot fail
        if let Ok(board) = Board::with_size(self.board.size() as usize) {
            self.board = board;
        }
        self.current_turn = Stone::Black;
        self.outcome = None;
        self.last_move = None;

        for (pos, color) in moves {
            if let Err(e) = self.board.place_stone(pos, color) {
                warn!("replaying {} failed during undo: {}", pos, e);
                continue;
            }
            self.move_history.push((pos, color));
            self.last_move = Some(pos);
            self.current_turn = color.opponent();
        }
        self.turn_started = Instant::now();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
